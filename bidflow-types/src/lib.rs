pub mod api;
pub mod bid;
pub mod company;
pub mod question;
pub mod tender;

pub use api::{
    AddCertificationRequest, AddCertificationResponse, AddProjectRequest, AddProjectResponse,
    BidListResponse, BidResponse, CompletenessResponse, CreateBidRequest, CreateBidResponse,
    ErrorResponse, GenerateResponse, ProfileResponse, QuestionsResponse, SaveDraftRequest,
    TenderListResponse, UpdateStatusRequest, UpsertCompanyRequest,
};
pub use bid::{Bid, BidContent, BidStatus, GeneratedContent};
pub use company::{Certification, Company, CompanyProfile, Project, PROJECT_VALUE_RANGES};
pub use question::{Question, QuestionKind};
pub use tender::{
    Sector, SortKey, Tender, TenderDocument, TenderFilters, TenderRequirements, TenderStatus,
    TenderWithScore,
};
