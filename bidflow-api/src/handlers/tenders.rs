use crate::handlers::storage_failure;
use crate::helpers::auth::Caller;
use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use bidflow_engine::{generate_questions, relevance_score};
use bidflow_types::{
    ErrorResponse, QuestionsResponse, SortKey, TenderFilters, TenderListResponse, TenderWithScore,
};
use tracing::{info, warn};

/// Deadline filter accepts a plain ISO date or a full RFC 3339 timestamp.
fn parse_deadline(raw: &str) -> Option<i64> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp());
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.timestamp())
}

fn validate_filters(filters: &TenderFilters) -> Result<Option<i64>, String> {
    if filters.min_value.is_some_and(|v| v < 0) {
        return Err("minValue must be non-negative".to_string());
    }
    if filters.max_value.is_some_and(|v| v < 0) {
        return Err("maxValue must be non-negative".to_string());
    }
    match &filters.deadline {
        None => Ok(None),
        Some(raw) => parse_deadline(raw)
            .map(Some)
            .ok_or_else(|| "deadline must be an ISO date".to_string()),
    }
}

#[get("/tenders")]
pub async fn list_tenders(
    caller: Caller,
    query: web::Query<TenderFilters>,
    state: web::Data<AppState>,
) -> impl Responder {
    let filters = query.into_inner();

    let deadline_from = match validate_filters(&filters) {
        Ok(deadline_from) => deadline_from,
        Err(reason) => {
            warn!(reason, "rejected tender filter set");
            return HttpResponse::BadRequest().json(ErrorResponse::new(reason));
        }
    };

    let profile = match state.storage.get_profile(&caller.user_id) {
        Ok(profile) => profile,
        Err(e) => return storage_failure("load tenders", &e),
    };

    let tenders = match state.storage.list_open_tenders(
        filters.sector,
        filters.min_value,
        filters.max_value,
        deadline_from,
    ) {
        Ok(tenders) => tenders,
        Err(e) => return storage_failure("load tenders", &e),
    };

    let mut scored: Vec<TenderWithScore> = tenders
        .into_iter()
        .map(|tender| {
            let relevance_score = relevance_score(&tender, profile.as_ref());
            TenderWithScore {
                tender,
                relevance_score,
            }
        })
        .collect();

    match filters.sort {
        SortKey::Relevance => scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score)),
        SortKey::Deadline => scored.sort_by(|a, b| a.tender.deadline.cmp(&b.tender.deadline)),
        SortKey::Value => scored.sort_by(|a, b| b.tender.value.cmp(&a.tender.value)),
    }

    info!(count = scored.len(), sort = ?filters.sort, "listed tenders");
    HttpResponse::Ok().json(TenderListResponse { tenders: scored })
}

#[get("/tenders/{id}")]
pub async fn get_tender(
    caller: Caller,
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let id = id.into_inner();

    let tender = match state.storage.get_tender(&id) {
        Ok(Some(tender)) => tender,
        Ok(None) => {
            warn!(tender_id = %id, "tender not found");
            return HttpResponse::NotFound().json(ErrorResponse::new("Tender not found."));
        }
        Err(e) => return storage_failure("load tender", &e),
    };

    let profile = match state.storage.get_profile(&caller.user_id) {
        Ok(profile) => profile,
        Err(e) => return storage_failure("load tender", &e),
    };

    let relevance_score = relevance_score(&tender, profile.as_ref());
    HttpResponse::Ok().json(TenderWithScore {
        tender,
        relevance_score,
    })
}

/// Questions are ephemeral: regenerated from the tender requirements on
/// every request, never stored.
#[get("/tenders/{id}/questions")]
pub async fn get_tender_questions(
    _caller: Caller,
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let id = id.into_inner();

    let tender = match state.storage.get_tender(&id) {
        Ok(Some(tender)) => tender,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse::new("Tender not found."));
        }
        Err(e) => return storage_failure("load questions", &e),
    };

    let questions =
        generate_questions(&tender.parsed_requirements(), &tender.title, tender.sector);
    HttpResponse::Ok().json(QuestionsResponse { questions })
}
