use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crm_portal::domain::types::{ContactId, TenantId};
use crm_portal::forms::auth::RegisterForm;
use crm_portal::models::config::ServerConfig;
use crm_portal::repository::{ContactListQuery, ContactReader, DieselRepository};
use crm_portal::routes::configure_api;
use crm_portal::services::auth as auth_service;

mod common;

fn test_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        templates_dir: "./templates/**/*".into(),
        assets_dir: "./assets".into(),
        secret: "integration-test-secret".into(),
        token_ttl_hours: 1,
        bcrypt_cost: 4,
    }
}

macro_rules! init_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new(test_config()))
                .service(web::scope("/api").configure(configure_api)),
        )
        .await
    };
}

/// Registers a workspace and returns the `{token, user, tenant}` response.
fn register(repo: &DieselRepository, email: &str, company: &str) -> Value {
    let response = auth_service::register(
        repo,
        &test_config(),
        RegisterForm {
            name: "Owner".into(),
            email: email.into(),
            password: "correct-horse".into(),
            company_name: company.into(),
        },
    )
    .unwrap();
    serde_json::to_value(response).unwrap()
}

fn bearer(token: &Value) -> (header::HeaderName, String) {
    (
        header::AUTHORIZATION,
        format!("Bearer {}", token.as_str().unwrap()),
    )
}

#[actix_web::test]
async fn test_create_contact_persists_row() {
    let test_db = common::TestDb::new("test_create_contact_persists_row.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    let auth = register(&repo, "owner@acme.example", "Acme");
    let req = test::TestRequest::post()
        .uri("/api/contacts")
        .insert_header(bearer(&auth["token"]))
        .set_json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "status": "prospect",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["first_name"], "Ada");
    assert_eq!(body["status"], "prospect");

    let tenant_id = TenantId::new(auth["tenant"]["id"].as_i64().unwrap() as i32).unwrap();
    let contact_id = ContactId::new(body["id"].as_i64().unwrap() as i32).unwrap();
    let stored = repo
        .get_contact_by_id(contact_id, tenant_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.last_name, "Lovelace");
}

#[actix_web::test]
async fn test_invalid_contact_is_bad_request() {
    let test_db = common::TestDb::new("test_invalid_contact_is_bad_request.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    let auth = register(&repo, "owner@acme.example", "Acme");
    let req = test::TestRequest::post()
        .uri("/api/contacts")
        .insert_header(bearer(&auth["token"]))
        .set_json(json!({ "first_name": "Ada", "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_unauthenticated_deal_list_is_rejected() {
    let test_db = common::TestDb::new("test_unauthenticated_deal_list_is_rejected.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    let req = test::TestRequest::get().uri("/api/deals").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "authentication required");

    let req = test::TestRequest::get()
        .uri("/api/deals")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_and_duplicate_registration() {
    let test_db = common::TestDb::new("test_login_and_duplicate_registration.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    register(&repo, "owner@acme.example", "Acme");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Copy",
            "email": "owner@acme.example",
            "password": "correct-horse",
            "company_name": "Copycat",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Founder",
            "email": "founder@globex.example",
            "password": "correct-horse",
            "company_name": "Globex",
        }))
        .to_request();
    let registered: Value = test::call_and_read_body_json(&app, req).await;
    assert!(registered["token"].is_string());
    assert_eq!(registered["tenant"]["plan"], "free");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "owner@acme.example", "password": "wrong-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@acme.example", "password": "correct-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let unknown_user: Value = test::read_body_json(resp).await;
    assert_eq!(wrong_password, unknown_user);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "owner@acme.example", "password": "correct-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["role"], "owner");

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&body["token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let me: Value = test::read_body_json(resp).await;
    assert_eq!(me["tenant"]["name"], "Acme");
    assert_eq!(me["onboarding_completed"], false);
}

#[actix_web::test]
async fn test_other_tenant_records_are_not_found() {
    let test_db = common::TestDb::new("test_other_tenant_records_are_not_found.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    let acme = register(&repo, "owner@acme.example", "Acme");
    let globex = register(&repo, "owner@globex.example", "Globex");

    let req = test::TestRequest::post()
        .uri("/api/deals")
        .insert_header(bearer(&acme["token"]))
        .set_json(json!({ "title": "Pilot", "amount": 1500.0, "stage": "proposal" }))
        .to_request();
    let deal: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deal["probability"], 50);

    let uri = format!("/api/deals/{}", deal["id"]);
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&globex["token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&globex["token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&acme["token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    for uri in ["/api/deals/0", "/api/contacts/-3", "/api/activities/0"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&acme["token"]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn test_huge_page_number_returns_empty_page() {
    let test_db = common::TestDb::new("test_huge_page_number_returns_empty_page.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    let auth = register(&repo, "owner@acme.example", "Acme");
    let req = test::TestRequest::post()
        .uri("/api/contacts")
        .insert_header(bearer(&auth["token"]))
        .set_json(json!({ "first_name": "Ada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/contacts?page={}", u64::MAX))
        .insert_header(bearer(&auth["token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["pages"], json!([1]));
}

#[actix_web::test]
async fn test_onboarding_flow() {
    let test_db = common::TestDb::new("test_onboarding_flow.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    let auth = register(&repo, "owner@acme.example", "Acme");

    let req = test::TestRequest::get()
        .uri("/api/onboarding")
        .insert_header(bearer(&auth["token"]))
        .to_request();
    let status: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(status["state"]["current_step"], "configuration");
    assert_eq!(status["completed"], false);

    let req = test::TestRequest::post()
        .uri("/api/onboarding")
        .insert_header(bearer(&auth["token"]))
        .set_json(json!({ "step": "billing", "plan": "starter" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    for step in [
        json!({ "step": "configuration", "company_name": "Acme Labs", "industry": "Software" }),
        json!({ "step": "tools", "tools": ["win-rate", "deal-pipeline"] }),
        json!({ "step": "billing", "plan": "professional" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/onboarding")
            .insert_header(bearer(&auth["token"]))
            .set_json(step)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&auth["token"]))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["onboarding_completed"], true);
    assert_eq!(me["tenant"]["name"], "Acme Labs");
    assert_eq!(me["tenant"]["plan"], "professional");

    let req = test::TestRequest::post()
        .uri("/api/onboarding")
        .insert_header(bearer(&auth["token"]))
        .set_json(json!({ "step": "billing", "plan": "free" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Payloads are not validated once the wizard is done.
    for step in [
        json!({ "step": "configuration", "company_name": "" }),
        json!({ "step": "tools", "tools": ["crystal-ball"] }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/onboarding")
            .insert_header(bearer(&auth["token"]))
            .set_json(step)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}

#[actix_web::test]
async fn test_tools_dashboard_and_settings() {
    let test_db = common::TestDb::new("test_tools_dashboard_and_settings.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    let auth = register(&repo, "owner@acme.example", "Acme");

    let req = test::TestRequest::get()
        .uri("/api/tools")
        .insert_header(bearer(&auth["token"]))
        .to_request();
    let dashboard: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<&str> = dashboard["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tool| tool["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["contact-insights", "deal-pipeline", "activity-tracker"]
    );
    assert_eq!(dashboard["tools"][0]["data"]["kind"], "contact_insights");
    assert_eq!(dashboard["tools"][0]["data"]["figures"]["total"], 0);

    let req = test::TestRequest::post()
        .uri("/api/tools")
        .insert_header(bearer(&auth["token"]))
        .set_json(json!({
            "action": "settings",
            "tools": [
                { "tool_id": "win-rate", "enabled": true },
                { "tool_id": "contact-insights", "enabled": false },
            ],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/tools")
        .insert_header(bearer(&auth["token"]))
        .set_json(json!({ "action": "create", "tool_id": "weather" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/tools?action=dashboard")
        .insert_header(bearer(&auth["token"]))
        .to_request();
    let dashboard: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(dashboard["tools"][0]["id"], "win-rate");
    assert_eq!(dashboard["tools"][0]["data"]["figures"]["rate"], 0.0);
    assert!(
        dashboard["tools"]
            .as_array()
            .unwrap()
            .iter()
            .all(|tool| tool["id"] != "contact-insights")
    );

    let req = test::TestRequest::get()
        .uri("/api/tools?action=settings")
        .insert_header(bearer(&auth["token"]))
        .to_request();
    let settings: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(settings["tools"].as_array().unwrap().len(), 6);
}

#[actix_web::test]
async fn test_members_cannot_manage_users_or_tools() {
    let test_db = common::TestDb::new("test_members_cannot_manage_users_or_tools.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    let owner = register(&repo, "owner@acme.example", "Acme");

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&owner["token"]))
        .set_json(json!({
            "name": "Member",
            "email": "member@acme.example",
            "password": "member-pass",
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["role"], "member");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "member@acme.example", "password": "member-pass" }))
        .to_request();
    let member: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer(&member["token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/tools")
        .insert_header(bearer(&member["token"]))
        .set_json(json!({ "action": "settings", "tools": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_csv_import_reports_skipped_rows() {
    let test_db = common::TestDb::new("test_csv_import_reports_skipped_rows.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo.clone());

    let auth = register(&repo, "owner@acme.example", "Acme");

    let boundary = "crm-portal-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"csv\"; filename=\"contacts.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         First_Name,Last_Name,Email,Status\r\n\
         Ada,Lovelace,ada@example.com,customer\r\n\
         ,Nobody,skip@example.com,lead\r\n\
         Grace,Hopper,,lead\r\n\
         --{boundary}--\r\n"
    );
    let req = test::TestRequest::post()
        .uri("/api/contacts/import")
        .insert_header(bearer(&auth["token"]))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let summary: Value = test::read_body_json(resp).await;
    assert_eq!(summary, json!({ "imported": 2, "skipped": 1 }));

    let tenant_id = TenantId::new(auth["tenant"]["id"].as_i64().unwrap() as i32).unwrap();
    let (total, _) = repo.list_contacts(ContactListQuery::new(tenant_id)).unwrap();
    assert_eq!(total, 2);
}
