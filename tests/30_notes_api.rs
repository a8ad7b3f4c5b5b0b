mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;
use notebook_api::auth::{generate_jwt, Claims};
use notebook_api::types::{NoteId, UserId};

fn bearer(user: UserId) -> String {
    format!("Bearer {}", generate_jwt(Claims::new(user)).expect("token"))
}

async fn ready_server() -> Option<&'static TestServer> {
    let server = common::try_server().await?;
    if !common::store_is_healthy(server).await {
        eprintln!("skipping: store degraded (set DATABASE_URL to a reachable Postgres)");
        return None;
    }
    Some(server)
}

#[tokio::test]
async fn create_rejects_short_title() -> Result<()> {
    let Some(server) = ready_server().await else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/notes/addnote", server.base_url))
        .header("Authorization", bearer(UserId::new()))
        .json(&json!({ "title": "ab", "description": "long enough" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["errors"][0]["field"], "title");

    Ok(())
}

#[tokio::test]
async fn create_rejects_short_description_and_keeps_field_order() -> Result<()> {
    let Some(server) = ready_server().await else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/notes/addnote", server.base_url))
        .header("Authorization", bearer(UserId::new()))
        .json(&json!({ "title": "ab", "description": "hi" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "description"]);

    Ok(())
}

#[tokio::test]
async fn missing_tag_defaults_to_general() -> Result<()> {
    let Some(server) = ready_server().await else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/notes/addnote", server.base_url))
        .header("Authorization", bearer(UserId::new()))
        .json(&json!({ "title": "Untagged", "description": "No tag supplied" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["tag"], "General");

    Ok(())
}

#[tokio::test]
async fn nonexistent_id_is_not_found_for_any_caller() -> Result<()> {
    let Some(server) = ready_server().await else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    // A fresh random id cannot exist; the answer must be 404, never 403
    let id = NoteId::new();

    let res = client
        .put(format!("{}/api/notes/updatenote/{}", server.base_url, id))
        .header("Authorization", bearer(UserId::new()))
        .json(&json!({ "title": "anything" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/api/notes/deletenote/{}", server.base_url, id))
        .header("Authorization", bearer(UserId::new()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn supplied_empty_tag_is_kept_not_defaulted() -> Result<()> {
    let Some(server) = ready_server().await else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let owner = UserId::new();

    let res = client
        .post(format!("{}/api/notes/addnote", server.base_url))
        .header("Authorization", bearer(owner))
        .json(&json!({ "title": "Tagged", "description": "Empty tag on purpose", "tag": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let note = res.json::<Value>().await?["data"].clone();
    assert_eq!(note["tag"], "");

    // Same distinction on update: absent leaves alone, empty overwrites
    let res = client
        .put(format!(
            "{}/api/notes/updatenote/{}",
            server.base_url,
            note["id"].as_str().unwrap()
        ))
        .header("Authorization", bearer(owner))
        .json(&json!({ "tag": "Home" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["data"]["tag"], "Home");

    Ok(())
}

#[tokio::test]
async fn notes_crud_round_trip() -> Result<()> {
    let Some(server) = ready_server().await else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let u1 = UserId::new();
    let u2 = UserId::new();

    // Create as u1
    let res = client
        .post(format!("{}/api/notes/addnote", server.base_url))
        .header("Authorization", bearer(u1))
        .json(&json!({
            "title": "Groceries",
            "description": "Buy milk and eggs",
            "tag": "Personal"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let note = res.json::<Value>().await?["data"].clone();
    let id = note["id"].as_str().unwrap().to_string();
    assert_eq!(note["owner"], u1.to_string().as_str());
    assert_eq!(note["tag"], "Personal");

    // u1 sees it, u2 does not
    let res = client
        .get(format!("{}/api/notes/fetchallnotes", server.base_url))
        .header("Authorization", bearer(u1))
        .send()
        .await?;
    let listed = res.json::<Value>().await?["data"].clone();
    assert!(listed.as_array().unwrap().iter().any(|n| n["id"] == id.as_str()));

    let res = client
        .get(format!("{}/api/notes/fetchallnotes", server.base_url))
        .header("Authorization", bearer(u2))
        .send()
        .await?;
    let listed = res.json::<Value>().await?["data"].clone();
    assert!(!listed.as_array().unwrap().iter().any(|n| n["id"] == id.as_str()));

    // Sparse update: only the tag changes
    let res = client
        .put(format!("{}/api/notes/updatenote/{}", server.base_url, id))
        .header("Authorization", bearer(u1))
        .json(&json!({ "tag": "Home" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?["data"].clone();
    assert_eq!(updated["title"], "Groceries");
    assert_eq!(updated["description"], "Buy milk and eggs");
    assert_eq!(updated["tag"], "Home");

    // u2 cannot update or delete it
    let res = client
        .put(format!("{}/api/notes/updatenote/{}", server.base_url, id))
        .header("Authorization", bearer(u2))
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?["code"], "FORBIDDEN");

    let res = client
        .delete(format!("{}/api/notes/deletenote/{}", server.base_url, id))
        .header("Authorization", bearer(u2))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // u1 deletes it; the confirmation carries the prior state
    let res = client
        .delete(format!("{}/api/notes/deletenote/{}", server.base_url, id))
        .header("Authorization", bearer(u1))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["message"], "Note has been deleted");
    assert_eq!(body["data"]["deleted_note"]["id"], id.as_str());
    assert_eq!(body["data"]["deleted_note"]["tag"], "Home");

    // Gone for good
    let res = client
        .delete(format!("{}/api/notes/deletenote/{}", server.base_url, id))
        .header("Authorization", bearer(u1))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
