//! Seeds a demo tenant for local development.
//!
//! Creates an owner account (`demo@example.com` / `demo-password`) with a few
//! companies, contacts, deals and activities. Running it twice fails on the
//! duplicate owner email and leaves the existing data untouched.

use chrono::{Duration, Utc};
use dotenvy::dotenv;

use crm_portal::db::establish_connection_pool;
use crm_portal::domain::activity::{ActivityType, NewActivity};
use crm_portal::domain::company::NewCompany;
use crm_portal::domain::contact::{ContactStatus, NewContact};
use crm_portal::domain::deal::{DealStage, NewDeal};
use crm_portal::domain::tenant::NewTenant;
use crm_portal::domain::types::{
    ActivitySubject, CompanyName, DealAmount, DealTitle, EmailAddress, PersonName, Probability,
    TenantName, UserName, WebsiteUrl,
};
use crm_portal::domain::user::Registration;
use crm_portal::models::config::ServerConfig;
use crm_portal::repository::{
    ActivityWriter, CompanyWriter, ContactWriter, DealWriter, DieselRepository, TenantWriter,
};
use crm_portal::services::ServiceResult;
use crm_portal::services::auth::hash_password;

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo-password";

const COMPANIES: &[(&str, &str, &str)] = &[
    ("Acme Corp", "Manufacturing", "https://acme.example"),
    ("Globex", "Energy", "https://globex.example"),
    ("Initech", "Software", "https://initech.example"),
];

const CONTACTS: &[(&str, &str, &str, ContactStatus, usize)] = &[
    ("Ada", "Lovelace", "ada@acme.example", ContactStatus::Customer, 0),
    ("Grace", "Hopper", "grace@globex.example", ContactStatus::Prospect, 1),
    ("Alan", "Turing", "alan@initech.example", ContactStatus::Lead, 2),
    ("Edsger", "Dijkstra", "edsger@acme.example", ContactStatus::Lead, 0),
];

const DEALS: &[(&str, f64, DealStage, usize)] = &[
    ("Acme annual license", 24_000.0, DealStage::ClosedWon, 0),
    ("Globex pilot", 8_500.0, DealStage::Proposal, 1),
    ("Initech rollout", 42_000.0, DealStage::Qualification, 2),
    ("Acme support add-on", 3_000.0, DealStage::ClosedLost, 3),
];

fn seed(repo: &DieselRepository, config: &ServerConfig) -> ServiceResult<()> {
    let registration = Registration {
        tenant: NewTenant::new(TenantName::new("Demo Workspace")?),
        email: EmailAddress::new(DEMO_EMAIL)?,
        name: UserName::new("Demo Owner")?,
        password_hash: hash_password(DEMO_PASSWORD, config.bcrypt_cost)?,
    };
    let (tenant, owner) = repo.register_tenant(&registration)?;
    log::info!("Created tenant {} with owner {}", tenant.id, owner.email);

    let mut companies = Vec::with_capacity(COMPANIES.len());
    for (name, industry, website) in COMPANIES {
        let company = repo.create_company(&NewCompany {
            tenant_id: tenant.id,
            name: CompanyName::new(*name)?,
            industry: Some(industry.to_string()),
            website: Some(WebsiteUrl::new(*website)?),
            phone: None,
            address: None,
        })?;
        companies.push(company.id);
    }

    let mut contacts = Vec::with_capacity(CONTACTS.len());
    for (first_name, last_name, email, status, company) in CONTACTS {
        let contact = repo.create_contact(&NewContact {
            tenant_id: tenant.id,
            company_id: companies.get(*company).copied(),
            first_name: PersonName::new(*first_name)?,
            last_name: last_name.to_string(),
            email: Some(EmailAddress::new(*email)?),
            phone: None,
            position: None,
            status: *status,
            notes: None,
        })?;
        contacts.push(contact.id);
    }

    let today = Utc::now().date_naive();
    let mut deals = Vec::with_capacity(DEALS.len());
    for (title, amount, stage, contact) in DEALS {
        let contact_id = contacts.get(*contact).copied();
        let company_id = CONTACTS
            .get(*contact)
            .and_then(|(.., company)| companies.get(*company).copied());
        let deal = repo.create_deal(&NewDeal {
            tenant_id: tenant.id,
            title: DealTitle::new(*title)?,
            amount: DealAmount::new(*amount)?,
            stage: *stage,
            probability: Probability::new(stage.default_probability())?,
            expected_close_date: Some(today + Duration::days(30)),
            contact_id,
            company_id,
        })?;
        deals.push(deal.id);
    }

    let now = Utc::now().naive_utc();
    let activities = [
        (ActivityType::Call, "Intro call with Grace", Some(now + Duration::days(1)), false, 1),
        (ActivityType::Meeting, "Initech kickoff", Some(now + Duration::days(7)), false, 2),
        (ActivityType::Email, "Send Acme invoice", Some(now - Duration::days(2)), false, 0),
        (ActivityType::Task, "Renew Acme contract", None, true, 0),
    ];
    for (activity_type, subject, due_at, completed, index) in activities {
        repo.create_activity(&NewActivity {
            tenant_id: tenant.id,
            activity_type,
            subject: ActivitySubject::new(subject)?,
            description: None,
            due_at,
            completed,
            contact_id: contacts.get(index).copied(),
            deal_id: deals.get(index).copied(),
        })?;
    }

    log::info!(
        "Seeded {} companies, {} contacts, {} deals and {} activities",
        companies.len(),
        contacts.len(),
        deals.len(),
        activities.len()
    );
    Ok(())
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    if let Err(err) = seed(&repo, &server_config) {
        log::error!("Failed to seed demo data: {err}");
        std::process::exit(1);
    }
}
