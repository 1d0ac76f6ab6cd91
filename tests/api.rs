use actix_web::http::StatusCode;
use actix_web::{App, test};
use blog_api::database::PostStore;
use blog_api::database::memory::{MemoryAuthorStore, MemoryPostStore};
use blog_api::post::post_model::{BlogPost, EmbeddedAuthor, PostAuthor};
use blog_api::state::AppState;
use mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};
use std::sync::Arc;

/// Runs one request against a fresh service over the shared state. Empty bodies come back as `Null`.
async fn send(state: &AppState, req: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is not JSON")
    };
    (status, json)
}

async fn create_author(state: &AppState, first: &str, last: &str, user: &str) -> Value {
    let (status, body) = send(
        state,
        test::TestRequest::post()
            .uri("/authors")
            .set_json(json!({ "firstName": first, "lastName": last, "userName": user })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn create_post(state: &AppState, title: &str, author_id: &str) -> Value {
    let (status, body) = send(
        state,
        test::TestRequest::post().uri("/blog-posts").set_json(json!({
            "title": title,
            "content": "Lorem ipsum",
            "author_id": author_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    send(state, test::TestRequest::get().uri(uri)).await
}

#[actix_web::test]
async fn create_author_returns_the_new_author() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;

    assert_eq!(author["firstName"], "Ada");
    assert_eq!(author["lastName"], "Lovelace");
    assert_eq!(author["userName"], "ada");
    assert_eq!(author["name"], "Ada Lovelace");
    assert!(ObjectId::parse_str(author["id"].as_str().unwrap()).is_ok());
}

#[actix_web::test]
async fn duplicate_user_name_is_rejected() {
    let state = AppState::in_memory();
    create_author(&state, "Ada", "Lovelace", "ada").await;

    let (status, body) = send(
        &state,
        test::TestRequest::post().uri("/authors").set_json(json!({
            "firstName": "Ada", "lastName": "King", "userName": "ada"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already taken");

    let (_, authors) = get(&state, "/authors").await;
    assert_eq!(authors.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn concurrent_duplicate_user_names_leave_one_winner() {
    let state = AppState::in_memory();
    let request = || {
        test::TestRequest::post().uri("/authors").set_json(json!({
            "firstName": "Ada", "lastName": "Lovelace", "userName": "ada"
        }))
    };

    let (first, second) =
        futures_util::future::join(send(&state, request()), send(&state, request())).await;

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    let (_, authors) = get(&state, "/authors").await;
    assert_eq!(authors.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn create_author_requires_every_field() {
    let state = AppState::in_memory();

    for (body, missing) in [
        (json!({ "lastName": "L", "userName": "u" }), "firstName"),
        (json!({ "firstName": "F", "userName": "u" }), "lastName"),
        (json!({ "firstName": "F", "lastName": "L" }), "userName"),
    ] {
        let (status, body) = send(
            &state,
            test::TestRequest::post().uri("/authors").set_json(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            format!("Missing `{}` in request body", missing)
        );
    }
}

#[actix_web::test]
async fn list_authors_projects_id_name_and_user_name() {
    let state = AppState::in_memory();
    let ada = create_author(&state, "Ada", "Lovelace", "ada").await;
    create_author(&state, "Grace", "Hopper", "grace").await;

    let (status, authors) = get(&state, "/authors").await;
    assert_eq!(status, StatusCode::OK);

    let authors = authors.as_array().unwrap();
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0]["id"], ada["id"]);
    assert_eq!(authors[0]["name"], "Ada Lovelace");
    assert_eq!(authors[0]["userName"], "ada");
    assert_eq!(authors[1]["name"], "Grace Hopper");
}

#[actix_web::test]
async fn create_post_shows_the_author_display_name() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;

    let post = create_post(&state, "Notes", author["id"].as_str().unwrap()).await;

    assert_eq!(post["title"], "Notes");
    assert_eq!(post["content"], "Lorem ipsum");
    assert_eq!(post["author"], "Ada Lovelace");
    assert!(post["created"].is_string());
    assert_eq!(post["comments"], json!([]));
}

#[actix_web::test]
async fn create_post_names_the_missing_field() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;
    let author_id = author["id"].as_str().unwrap();

    for (body, missing) in [
        (json!({ "content": "c", "author_id": author_id }), "title"),
        (json!({ "title": "t", "author_id": author_id }), "content"),
        (json!({ "title": "t", "content": "c" }), "author_id"),
    ] {
        let (status, body) = send(
            &state,
            test::TestRequest::post().uri("/blog-posts").set_json(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            format!("Missing `{}` in request body", missing)
        );
    }

    let (_, posts) = get(&state, "/blog-posts").await;
    assert_eq!(posts, json!([]));
}

#[actix_web::test]
async fn create_post_rejects_unknown_authors() {
    let state = AppState::in_memory();

    for author_id in [ObjectId::new().to_hex(), "not-an-object-id".to_string()] {
        let (status, body) = send(
            &state,
            test::TestRequest::post().uri("/blog-posts").set_json(json!({
                "title": "t", "content": "c", "author_id": author_id
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            format!("Author with id `{}` not found", author_id)
        );
    }
}

#[actix_web::test]
async fn create_post_rejects_blank_title() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;

    let (status, body) = send(
        &state,
        test::TestRequest::post().uri("/blog-posts").set_json(json!({
            "title": "  ", "content": "c", "author_id": author["id"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "`title` must not be empty");
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let state = AppState::in_memory();

    let (status, body) = send(
        &state,
        test::TestRequest::post()
            .uri("/blog-posts")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[actix_web::test]
async fn list_posts_returns_every_post() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;
    let author_id = author["id"].as_str().unwrap();

    for i in 0..3 {
        create_post(&state, &format!("Post {}", i), author_id).await;
    }

    let (status, posts) = get(&state, "/blog-posts").await;
    assert_eq!(status, StatusCode::OK);

    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 3);
    for post in posts {
        for key in ["id", "title", "content", "author", "created"] {
            assert!(post.get(key).is_some(), "missing {key} in {post}");
        }
        assert_eq!(post["author"], "Ada Lovelace");
    }
}

#[actix_web::test]
async fn get_post_by_id() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;
    let post = create_post(&state, "Notes", author["id"].as_str().unwrap()).await;

    let (status, fetched) = get(&state, &format!("/blog-posts/{}", post["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, post);
}

#[actix_web::test]
async fn get_unknown_post_is_a_generic_server_error() {
    let state = AppState::in_memory();

    for id in [ObjectId::new().to_hex(), "garbage".to_string()] {
        let (status, body) = get(&state, &format!("/blog-posts/{}", id)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Internal server error" }));
    }
}

#[actix_web::test]
async fn put_post_with_mismatched_ids_changes_nothing() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;
    let post = create_post(&state, "Notes", author["id"].as_str().unwrap()).await;
    let id = post["id"].as_str().unwrap();
    let other = ObjectId::new().to_hex();

    let (status, body) = send(
        &state,
        test::TestRequest::put()
            .uri(&format!("/blog-posts/{}", id))
            .set_json(json!({ "id": other, "title": "Changed" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        format!(
            "Request path id ({}) and request body id ({}) must match",
            id, other
        )
    );

    let (_, fetched) = get(&state, &format!("/blog-posts/{}", id)).await;
    assert_eq!(fetched["title"], "Notes");
}

#[actix_web::test]
async fn put_post_updates_only_supplied_fields() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;
    let post = create_post(&state, "Notes", author["id"].as_str().unwrap()).await;
    let id = post["id"].as_str().unwrap();

    let (status, body) = send(
        &state,
        test::TestRequest::put()
            .uri(&format!("/blog-posts/{}", id))
            .set_json(json!({ "id": id, "title": "Better notes" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, fetched) = get(&state, &format!("/blog-posts/{}", id)).await;
    assert_eq!(fetched["title"], "Better notes");
    assert_eq!(fetched["content"], "Lorem ipsum");
    assert_eq!(fetched["author"], "Ada Lovelace");
}

#[actix_web::test]
async fn deleted_post_is_gone() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;
    let post = create_post(&state, "Notes", author["id"].as_str().unwrap()).await;
    let uri = format!("/blog-posts/{}", post["id"].as_str().unwrap());

    let (status, _) = send(&state, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&state, &uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // deleting again is an error response, not a crash
    let (status, body) = send(&state, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
}

#[actix_web::test]
async fn update_author_returns_the_projection_and_renames_posts() {
    let state = AppState::in_memory();
    let author = create_author(&state, "Ada", "Lovelace", "ada").await;
    let id = author["id"].as_str().unwrap();
    let post = create_post(&state, "Notes", id).await;

    let (status, updated) = send(
        &state,
        test::TestRequest::put()
            .uri(&format!("/authors/{}", id))
            .set_json(json!({ "id": id, "lastName": "King" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ada King");
    assert_eq!(updated["userName"], "ada");

    let (_, fetched) = get(&state, &format!("/blog-posts/{}", post["id"].as_str().unwrap())).await;
    assert_eq!(fetched["author"], "Ada King");
}

#[actix_web::test]
async fn update_author_checks_ids_and_user_names() {
    let state = AppState::in_memory();
    create_author(&state, "Ada", "Lovelace", "ada").await;
    let grace = create_author(&state, "Grace", "Hopper", "grace").await;
    let id = grace["id"].as_str().unwrap();

    let (status, _) = send(
        &state,
        test::TestRequest::put()
            .uri(&format!("/authors/{}", id))
            .set_json(json!({ "firstName": "G" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &state,
        test::TestRequest::put()
            .uri(&format!("/authors/{}", id))
            .set_json(json!({ "id": id, "userName": "ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already taken");
}

#[actix_web::test]
async fn delete_author_removes_the_author_not_other_posts() {
    // Removes from the author collection (plus that author's posts); other
    // authors' posts must survive.
    let state = AppState::in_memory();
    let ada = create_author(&state, "Ada", "Lovelace", "ada").await;
    let grace = create_author(&state, "Grace", "Hopper", "grace").await;
    create_post(&state, "By Ada", ada["id"].as_str().unwrap()).await;
    let kept = create_post(&state, "By Grace", grace["id"].as_str().unwrap()).await;

    let (status, body) = send(
        &state,
        test::TestRequest::delete().uri(&format!("/authors/{}", ada["id"].as_str().unwrap())),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, authors) = get(&state, "/authors").await;
    assert_eq!(authors.as_array().unwrap().len(), 1);
    assert_eq!(authors[0]["userName"], "grace");

    let (_, posts) = get(&state, "/blog-posts").await;
    assert_eq!(posts, json!([kept]));
}

#[actix_web::test]
async fn delete_unknown_author_is_a_server_error() {
    let state = AppState::in_memory();
    let (status, _) = send(
        &state,
        test::TestRequest::delete().uri(&format!("/authors/{}", ObjectId::new().to_hex())),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn posts_with_embedded_authors_are_still_served() {
    let authors = Arc::new(MemoryAuthorStore::new());
    let posts = Arc::new(MemoryPostStore::new());
    let state = AppState::new(authors, posts.clone());

    let legacy = BlogPost {
        id: ObjectId::new(),
        title: "Old post".into(),
        content: "From the embedded-author days".into(),
        author: PostAuthor::Embedded(EmbeddedAuthor {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
        }),
        created: None,
        comments: vec![],
    };
    posts.insert(legacy.clone()).await.unwrap();

    let (status, fetched) = get(&state, &format!("/blog-posts/{}", legacy.id.to_hex())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["author"], "Grace Hopper");
    assert_eq!(fetched["created"], Value::Null);
}

#[actix_web::test]
async fn post_left_without_its_author_fails_the_whole_list() {
    let authors = Arc::new(MemoryAuthorStore::new());
    let posts = Arc::new(MemoryPostStore::new());
    let state = AppState::new(authors, posts.clone());

    let ada = create_author(&state, "Ada", "Lovelace", "ada").await;
    create_post(&state, "Kept", ada["id"].as_str().unwrap()).await;

    // author removed between the existence check and the insert
    let orphan = BlogPost::new("Orphan".into(), "Body".into(), ObjectId::new(), vec![]).unwrap();
    posts.insert(orphan).await.unwrap();

    let (status, body) = get(&state, "/blog-posts").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Internal server error" }));
}

#[actix_web::test]
async fn unknown_routes_are_not_found() {
    let state = AppState::in_memory();

    for req in [
        test::TestRequest::get().uri("/nonexistent"),
        test::TestRequest::patch().uri("/blog-posts"),
        test::TestRequest::get().uri("/authors/some-id"),
    ] {
        let (status, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Not Found" }));
    }
}
