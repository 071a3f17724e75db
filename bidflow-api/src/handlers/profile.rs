use crate::handlers::storage_failure;
use crate::helpers::auth::Caller;
use crate::AppState;
use actix_web::{get, post, put, web, HttpResponse, Responder};
use bidflow_types::{
    AddCertificationRequest, AddCertificationResponse, AddProjectRequest, AddProjectResponse,
    ErrorResponse, ProfileResponse, UpsertCompanyRequest, PROJECT_VALUE_RANGES,
};
use tracing::info;

const MAX_CAPABILITY_TAGS: usize = 30;

#[get("/profile")]
pub async fn get_profile(caller: Caller, state: web::Data<AppState>) -> impl Responder {
    match state.storage.get_profile(&caller.user_id) {
        Ok(Some(company)) => HttpResponse::Ok().json(ProfileResponse { company }),
        Ok(None) => {
            HttpResponse::NotFound().json(ErrorResponse::new("Company profile not found."))
        }
        Err(e) => storage_failure("load profile", &e),
    }
}

#[put("/profile")]
pub async fn upsert_profile(
    caller: Caller,
    request: web::Json<UpsertCompanyRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let request = request.into_inner();

    if request.name.trim().len() < 2 {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("Company name must be at least 2 characters"));
    }
    if request.sectors.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Select at least one sector"));
    }
    if request.capability_tags.len() > MAX_CAPABILITY_TAGS {
        return HttpResponse::BadRequest().json(ErrorResponse::new(format!(
            "Maximum {MAX_CAPABILITY_TAGS} tags allowed"
        )));
    }

    match state.storage.upsert_company(&caller.user_id, &request) {
        Ok(company) => {
            info!(company_id = %company.id, "company profile saved");
            match state.storage.get_profile(&caller.user_id) {
                Ok(Some(profile)) => HttpResponse::Ok().json(ProfileResponse { company: profile }),
                Ok(None) => storage_failure(
                    "save profile",
                    &crate::storage::StorageError::NotFound,
                ),
                Err(e) => storage_failure("save profile", &e),
            }
        }
        Err(e) => storage_failure("save profile", &e),
    }
}

#[post("/profile/projects")]
pub async fn add_project(
    caller: Caller,
    request: web::Json<AddProjectRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let request = request.into_inner();

    if request.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Project name is required"));
    }
    // Value ranges come from a closed catalogue; the scorer's value-range
    // parser understands exactly these strings.
    if !PROJECT_VALUE_RANGES.contains(&request.value_range.as_str()) {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Unknown value range"));
    }
    let current_year = chrono::Datelike::year(&chrono::Utc::now());
    if request.year_completed < 2000 || request.year_completed > current_year {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("Year completed is out of range"));
    }

    let company = match state.storage.get_company_by_owner(&caller.user_id) {
        Ok(Some(company)) => company,
        Ok(None) => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::new("Complete your company profile first"));
        }
        Err(e) => return storage_failure("add project", &e),
    };

    match state.storage.add_project(&company.id, &request) {
        Ok(project) => HttpResponse::Created().json(AddProjectResponse { project }),
        Err(e) => storage_failure("add project", &e),
    }
}

#[post("/profile/certifications")]
pub async fn add_certification(
    caller: Caller,
    request: web::Json<AddCertificationRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let request = request.into_inner();

    if request.name.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("Certification name is required"));
    }
    if request.issuing_body.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Issuing body is required"));
    }

    let company = match state.storage.get_company_by_owner(&caller.user_id) {
        Ok(Some(company)) => company,
        Ok(None) => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::new("Complete your company profile first"));
        }
        Err(e) => return storage_failure("add certification", &e),
    };

    match state.storage.add_certification(&company.id, &request) {
        Ok(certification) => {
            HttpResponse::Created().json(AddCertificationResponse { certification })
        }
        Err(e) => storage_failure("add certification", &e),
    }
}
