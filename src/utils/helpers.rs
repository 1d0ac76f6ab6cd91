use crate::utils::error::CustomError;
use mongodb::bson::oid::ObjectId;

/// Presence check for a request body key. The message names the key as the client sent it.
pub fn require_field(value: Option<String>, key: &str) -> Result<String, CustomError> {
    value.ok_or_else(|| CustomError::BadRequestError(format!("Missing `{}` in request body", key)))
}

/// Required text must contain something other than whitespace.
pub fn non_empty(value: String, field: &str) -> Result<String, CustomError> {
    if value.trim().is_empty() {
        return Err(CustomError::ValidationError(format!(
            "`{}` must not be empty",
            field
        )));
    }
    Ok(value)
}

/// Same as [`non_empty`] for fields that may be left out of a partial update.
pub fn non_empty_opt(value: Option<String>, field: &str) -> Result<Option<String>, CustomError> {
    value.map(|v| non_empty(v, field)).transpose()
}

/// Path ids that are not valid object ids can never resolve to a document.
pub fn parse_object_id(id: &str, entity: &str) -> Result<ObjectId, CustomError> {
    ObjectId::parse_str(id)
        .map_err(|_| CustomError::NotFoundError(format!("No {} with id `{}`", entity, id)))
}

pub fn ensure_ids_match(path_id: &str, body_id: Option<&str>) -> Result<(), CustomError> {
    match body_id {
        Some(body_id) if !path_id.is_empty() && body_id == path_id => Ok(()),
        _ => Err(CustomError::BadRequestError(format!(
            "Request path id ({}) and request body id ({}) must match",
            path_id,
            body_id.unwrap_or("undefined")
        ))),
    }
}
