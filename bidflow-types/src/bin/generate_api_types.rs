use bidflow_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the web frontend
    let mut types = Vec::new();

    types.push(clean_type(Sector::export_to_string()?));
    types.push(clean_type(TenderStatus::export_to_string()?));
    types.push(clean_type(TenderDocument::export_to_string()?));
    types.push(clean_type(TenderRequirements::export_to_string()?));
    types.push(clean_type(SortKey::export_to_string()?));
    types.push(clean_type(BidStatus::export_to_string()?));
    types.push(clean_type(QuestionKind::export_to_string()?));
    types.push(clean_type(Question::export_to_string()?));
    types.push(clean_type(Project::export_to_string()?));
    types.push(clean_type(Certification::export_to_string()?));
    types.push(clean_type(CreateBidRequest::export_to_string()?));
    types.push(clean_type(CreateBidResponse::export_to_string()?));
    types.push(clean_type(UpdateStatusRequest::export_to_string()?));
    types.push(clean_type(CompletenessResponse::export_to_string()?));
    types.push(clean_type(UpsertCompanyRequest::export_to_string()?));
    types.push(clean_type(AddProjectRequest::export_to_string()?));
    types.push(clean_type(AddCertificationRequest::export_to_string()?));

    let output = format!(
        "// Auto-generated by bidflow-types. Do not edit by hand.\n\n{}\n",
        types.join("\n\n")
    );

    let out_path = Path::new("web/src/types/api.ts");
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out_path, output)?;

    println!("Wrote {} type definitions to {}", types.len(), out_path.display());
    Ok(())
}

fn clean_type(type_def: String) -> String {
    type_def.trim().to_string()
}
