//! Server-rendered marketing pages.

use actix_web::{HttpResponse, Responder, get, web};
use tera::{Context, Tera};

use crate::domain::tenant::BillingPlan;
use crate::domain::tool::TOOL_CATALOG;
use crate::dto::marketing::PlanCard;

fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn plan_cards() -> Vec<PlanCard> {
    BillingPlan::ALL.iter().copied().map(PlanCard::from).collect()
}

#[get("/")]
pub async fn show_index(tera: web::Data<Tera>) -> impl Responder {
    let mut context = Context::new();
    context.insert("current_page", "index");
    context.insert("tools", TOOL_CATALOG);
    context.insert("plans", &plan_cards());

    render_template(&tera, "index.html", &context)
}

#[get("/pricing")]
pub async fn show_pricing(tera: web::Data<Tera>) -> impl Responder {
    let mut context = Context::new();
    context.insert("current_page", "pricing");
    context.insert("plans", &plan_cards());

    render_template(&tera, "pricing.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_lists_every_plan_in_order() {
        let cards = plan_cards();
        assert_eq!(cards.len(), BillingPlan::ALL.len());
        assert_eq!(cards[0].id, BillingPlan::Free);
        assert_eq!(cards[0].monthly_price, 0);
    }
}
