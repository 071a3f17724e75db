use crate::handlers::storage_failure;
use crate::helpers::auth::Caller;
use crate::AppState;
use actix_web::{get, post, put, web, HttpResponse, Responder};
use bidflow_engine::{
    generate_document, generate_questions, is_valid_transition, validate_completeness,
    TemplateContext,
};
use bidflow_types::{
    Bid, BidContent, BidListResponse, BidResponse, BidStatus, CompletenessResponse,
    CreateBidRequest, CreateBidResponse, ErrorResponse, GenerateResponse, GeneratedContent,
    SaveDraftRequest, Tender, UpdateStatusRequest,
};
use std::collections::HashMap;
use tracing::{info, warn};

/// Load a bid and verify the caller's company owns it. Not-found and
/// unauthorized are distinct outcomes; the latter deliberately carries no
/// detail.
fn owned_bid(state: &AppState, bid_id: &str, user_id: &str) -> Result<Bid, HttpResponse> {
    let bid = match state.storage.get_bid(bid_id) {
        Ok(Some(bid)) => bid,
        Ok(None) => {
            warn!(bid_id, "bid not found");
            return Err(HttpResponse::NotFound().json(ErrorResponse::new("Bid not found.")));
        }
        Err(e) => return Err(storage_failure("load bid", &e)),
    };

    let company = match state.storage.get_company(&bid.company_id) {
        Ok(Some(company)) => company,
        Ok(None) => return Err(storage_failure(
            "load bid",
            &crate::storage::StorageError::NotFound,
        )),
        Err(e) => return Err(storage_failure("load bid", &e)),
    };

    if company.owner_id != user_id {
        warn!(bid_id, "ownership check failed");
        return Err(HttpResponse::Forbidden().json(ErrorResponse::new("Unauthorized.")));
    }

    Ok(bid)
}

fn bid_tender(state: &AppState, bid: &Bid) -> Result<Tender, HttpResponse> {
    match state.storage.get_tender(&bid.tender_id) {
        Ok(Some(tender)) => Ok(tender),
        Ok(None) => Err(storage_failure(
            "load bid",
            &crate::storage::StorageError::NotFound,
        )),
        Err(e) => Err(storage_failure("load bid", &e)),
    }
}

fn is_editable(status: BidStatus) -> bool {
    matches!(status, BidStatus::Draft | BidStatus::InReview)
}

/// Idempotent creation: a second request for the same (tender, company)
/// pair returns the existing bid id.
#[post("/bids")]
pub async fn create_bid(
    caller: Caller,
    request: web::Json<CreateBidRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let company = match state.storage.get_company_by_owner(&caller.user_id) {
        Ok(Some(company)) => company,
        Ok(None) => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::new("Complete your company profile first"));
        }
        Err(e) => return storage_failure("create bid", &e),
    };

    match state.storage.get_tender(&request.tender_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse::new("Tender not found."));
        }
        Err(e) => return storage_failure("create bid", &e),
    }

    match state.storage.find_bid_by_pair(&request.tender_id, &company.id) {
        Ok(Some(existing)) => {
            return HttpResponse::Ok().json(CreateBidResponse {
                bid_id: existing.id,
            });
        }
        Ok(None) => {}
        Err(e) => return storage_failure("create bid", &e),
    }

    match state.storage.create_bid(&request.tender_id, &company.id) {
        Ok(bid) => {
            info!(bid_id = %bid.id, tender_id = %bid.tender_id, "bid created");
            HttpResponse::Created().json(CreateBidResponse { bid_id: bid.id })
        }
        Err(e) => storage_failure("create bid", &e),
    }
}

#[get("/bids")]
pub async fn list_bids(caller: Caller, state: web::Data<AppState>) -> impl Responder {
    let company = match state.storage.get_company_by_owner(&caller.user_id) {
        Ok(Some(company)) => company,
        Ok(None) => return HttpResponse::Ok().json(BidListResponse { bids: vec![] }),
        Err(e) => return storage_failure("load bids", &e),
    };

    match state.storage.list_bids_for_company(&company.id) {
        Ok(bids) => HttpResponse::Ok().json(BidListResponse { bids }),
        Err(e) => storage_failure("load bids", &e),
    }
}

#[get("/bids/{id}")]
pub async fn get_bid(
    caller: Caller,
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let bid = match owned_bid(&state, &id, &caller.user_id) {
        Ok(bid) => bid,
        Err(response) => return response,
    };
    let tender = match bid_tender(&state, &bid) {
        Ok(tender) => tender,
        Err(response) => return response,
    };

    let questions =
        generate_questions(&tender.parsed_requirements(), &tender.title, tender.sector);
    let completeness = validate_completeness(bid.content.answers(), &questions);

    HttpResponse::Ok().json(BidResponse {
        bid,
        completeness: CompletenessResponse {
            complete: completeness.complete,
            answered_count: completeness.answered_count,
            total_required: completeness.total_required,
            missing_questions: completeness.missing_questions,
        },
    })
}

/// Overwrite the draft answer map. Only DRAFT and IN_REVIEW bids are
/// editable; the write is a plain overwrite, so retries are safe.
#[put("/bids/{id}/draft")]
pub async fn save_draft(
    caller: Caller,
    id: web::Path<String>,
    request: web::Json<SaveDraftRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let bid = match owned_bid(&state, &id, &caller.user_id) {
        Ok(bid) => bid,
        Err(response) => return response,
    };

    if !is_editable(bid.status) {
        warn!(bid_id = %bid.id, status = %bid.status, "draft save rejected");
        return HttpResponse::Conflict()
            .json(ErrorResponse::new("Cannot edit bid in current status."));
    }

    let content = BidContent::Answers(request.into_inner().content);
    match state.storage.update_bid_content(&bid.id, &content) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => storage_failure("save bid draft", &e),
    }
}

/// Transition the bid through its lifecycle. FINALIZED and SUBMITTED gate
/// on completeness against questions freshly regenerated from the tender's
/// requirements, never a stored snapshot.
#[put("/bids/{id}/status")]
pub async fn update_status(
    caller: Caller,
    id: web::Path<String>,
    request: web::Json<UpdateStatusRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let bid = match owned_bid(&state, &id, &caller.user_id) {
        Ok(bid) => bid,
        Err(response) => return response,
    };
    let next = request.status;

    if !is_valid_transition(bid.status, next) {
        warn!(bid_id = %bid.id, from = %bid.status, to = %next, "invalid transition");
        return HttpResponse::Conflict().json(ErrorResponse::new(format!(
            "Invalid status transition from {} to {}.",
            bid.status, next
        )));
    }

    if matches!(next, BidStatus::Finalized | BidStatus::Submitted) {
        let tender = match bid_tender(&state, &bid) {
            Ok(tender) => tender,
            Err(response) => return response,
        };
        let questions =
            generate_questions(&tender.parsed_requirements(), &tender.title, tender.sector);
        let completeness = validate_completeness(bid.content.answers(), &questions);

        if !completeness.complete {
            warn!(
                bid_id = %bid.id,
                missing = completeness.missing_questions.len(),
                "transition rejected as incomplete"
            );
            return HttpResponse::Conflict().json(ErrorResponse {
                error: format!(
                    "Bid is incomplete. {} required question(s) unanswered.",
                    completeness.missing_questions.len()
                ),
                details: Some(HashMap::from([(
                    "completeness".to_string(),
                    completeness.missing_questions,
                )])),
            });
        }
    }

    match state.storage.update_bid_status(&bid.id, next) {
        Ok(()) => {
            info!(bid_id = %bid.id, from = %bid.status, to = %next, "bid status updated");
            HttpResponse::Ok().json(serde_json::json!({ "success": true }))
        }
        Err(e) => storage_failure("update bid status", &e),
    }
}

/// Generate the full bid document: each section streamed sequentially
/// through the mock generator, then one persistence write with answers,
/// sections, and the generation timestamp. A client that disconnects
/// mid-generation drops the handler future, cancelling the in-flight
/// stream with nothing persisted.
#[post("/bids/{id}/generate")]
pub async fn generate_bid(
    caller: Caller,
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let bid = match owned_bid(&state, &id, &caller.user_id) {
        Ok(bid) => bid,
        Err(response) => return response,
    };

    if !is_editable(bid.status) {
        return HttpResponse::Conflict()
            .json(ErrorResponse::new("Cannot modify bid in current status."));
    }

    let tender = match bid_tender(&state, &bid) {
        Ok(tender) => tender,
        Err(response) => return response,
    };
    let company = match state.storage.get_company(&bid.company_id) {
        Ok(Some(company)) => company,
        Ok(None) => {
            return storage_failure("generate bid", &crate::storage::StorageError::NotFound)
        }
        Err(e) => return storage_failure("generate bid", &e),
    };

    let context = TemplateContext {
        tender_title: tender.title.clone(),
        company_name: Some(company.name),
        sector: Some(tender.sector.to_string()),
    };
    let answers = bid.content.answers().clone();

    let document = match generate_document(&answers, &context, &state.generator).await {
        Ok(document) => document,
        Err(e) => {
            warn!(bid_id = %bid.id, error = %e, "generation failed");
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }
    };

    let content = BidContent::Generated(GeneratedContent {
        answers,
        sections: document.sections.clone(),
        generated_at: document.generated_at.clone(),
    });
    if let Err(e) = state.storage.update_bid_content(&bid.id, &content) {
        return storage_failure("save generated bid", &e);
    }

    info!(bid_id = %bid.id, sections = document.sections.len(), "bid document generated");
    HttpResponse::Ok().json(GenerateResponse {
        sections: document.sections,
        generated_at: document.generated_at,
    })
}
