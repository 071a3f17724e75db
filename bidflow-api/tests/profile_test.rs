mod common;

use actix_web::test;
use actix_web::test::TestRequest;
use common::setup_test_app;
use serde_json::json;

#[actix_rt::test]
async fn test_fresh_caller_can_create_profile() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    // First request ever from this caller: nothing seeded, the id exists
    // only in the forwarded header.
    let req = TestRequest::put()
        .uri("/profile")
        .insert_header(("X-User-Id", "fresh-external-user"))
        .set_json(json!({
            "name": "TechBuild Solutions",
            "sectors": ["IT"],
            "capabilityTags": ["Cloud Services"],
        }))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert!(
        resp.status().is_success(),
        "profile upsert for a first-time caller failed: {}",
        resp.status()
    );
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["company"]["name"], "TechBuild Solutions");
    assert_eq!(body["company"]["ownerId"], "fresh-external-user");

    let req = TestRequest::get()
        .uri("/profile")
        .insert_header(("X-User-Id", "fresh-external-user"))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert!(resp.status().is_success());
    Ok(())
}

#[actix_rt::test]
async fn test_upsert_overwrites_and_keeps_relations() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = TestRequest::put()
        .uri("/profile")
        .insert_header(("X-User-Id", "u1"))
        .set_json(json!({
            "name": "TechBuild Solutions",
            "sectors": ["IT"],
            "capabilityTags": [],
        }))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert!(resp.status().is_success());

    let req = TestRequest::post()
        .uri("/profile/projects")
        .insert_header(("X-User-Id", "u1"))
        .set_json(json!({
            "name": "Patient Portal Rebuild",
            "sector": "IT",
            "valueRange": "500k - 1M",
            "yearCompleted": 2023,
        }))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), 201);

    // Second upsert replaces the profile fields, not the relations.
    let req = TestRequest::put()
        .uri("/profile")
        .insert_header(("X-User-Id", "u1"))
        .set_json(json!({
            "name": "TechBuild Solutions Ltd",
            "sectors": ["IT", "Construction"],
            "capabilityTags": ["Renovation"],
        }))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["company"]["name"], "TechBuild Solutions Ltd");
    assert_eq!(body["company"]["projects"].as_array().unwrap().len(), 1);
    Ok(())
}

#[actix_rt::test]
async fn test_profile_validation_rejections() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = TestRequest::put()
        .uri("/profile")
        .insert_header(("X-User-Id", "u1"))
        .set_json(json!({ "name": "X", "sectors": ["IT"], "capabilityTags": [] }))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), 400);

    let req = TestRequest::put()
        .uri("/profile")
        .insert_header(("X-User-Id", "u1"))
        .set_json(json!({ "name": "TechBuild", "sectors": [], "capabilityTags": [] }))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), 400);

    // Projects require a profile and a catalogued value range.
    let req = TestRequest::post()
        .uri("/profile/projects")
        .insert_header(("X-User-Id", "nobody"))
        .set_json(json!({
            "name": "P",
            "sector": "IT",
            "valueRange": "500k - 1M",
            "yearCompleted": 2023,
        }))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["error"], "Complete your company profile first");
    Ok(())
}
