use crate::DbConnection;
use bidflow_types::{
    AddCertificationRequest, AddProjectRequest, Bid, BidContent, BidStatus, Certification,
    Company, CompanyProfile, Project, Sector, Tender, TenderStatus, UpsertCompanyRequest,
};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use std::sync::MutexGuard;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("record not found")]
    NotFound,
    #[error("operation failed: {0}")]
    OperationFailed(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Record store backed by sqlite behind a shared connection.
#[derive(Clone)]
pub struct SqliteStorage {
    connection: DbConnection,
}

impl SqliteStorage {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, rusqlite::Connection>, StorageError> {
        self.connection
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))
    }

    // --- companies, projects, certifications ---

    /// One company per owning user: creates on first call, overwrites the
    /// profile fields afterwards.
    pub fn upsert_company(
        &self,
        owner_id: &str,
        request: &UpsertCompanyRequest,
    ) -> Result<Company, StorageError> {
        let existing = self.get_company_by_owner(owner_id)?;
        let conn = self.lock()?;
        let now = Utc::now().timestamp();
        let sectors_json = serde_json::to_string(&request.sectors)?;
        let tags_json = serde_json::to_string(&request.capability_tags)?;

        match existing {
            Some(mut company) => {
                conn.execute(
                    r#"
                    UPDATE companies
                    SET name = ?1, sectors = ?2, capability_tags = ?3, updated_at = ?4
                    WHERE id = ?5
                    "#,
                    params![request.name, sectors_json, tags_json, now, company.id],
                )
                .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
                company.name = request.name.clone();
                company.sectors = request.sectors.clone();
                company.capability_tags = request.capability_tags.clone();
                company.updated_at = now;
                Ok(company)
            }
            None => {
                let id = Uuid::new_v4().to_string();
                conn.execute(
                    r#"
                    INSERT INTO companies
                        (id, owner_id, name, sectors, capability_tags, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                    params![id, owner_id, request.name, sectors_json, tags_json, now, now],
                )
                .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
                Ok(Company {
                    id,
                    owner_id: owner_id.to_string(),
                    name: request.name.clone(),
                    sectors: request.sectors.clone(),
                    capability_tags: request.capability_tags.clone(),
                    created_at: now,
                    updated_at: now,
                })
            }
        }
    }

    pub fn get_company_by_owner(&self, owner_id: &str) -> Result<Option<Company>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, owner_id, name, sectors, capability_tags, created_at, updated_at
                FROM companies
                WHERE owner_id = ?1
                "#,
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        stmt.query_row(params![owner_id], map_company_row)
            .optional()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))
    }

    pub fn get_company(&self, id: &str) -> Result<Option<Company>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, owner_id, name, sectors, capability_tags, created_at, updated_at
                FROM companies
                WHERE id = ?1
                "#,
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        stmt.query_row(params![id], map_company_row)
            .optional()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))
    }

    pub fn add_project(
        &self,
        company_id: &str,
        request: &AddProjectRequest,
    ) -> Result<Project, StorageError> {
        let conn = self.lock()?;
        let id = Uuid::new_v4().to_string();
        conn.execute(
            r#"
            INSERT INTO projects (id, company_id, name, sector, value_range, year_completed)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                id,
                company_id,
                request.name,
                request.sector.as_str(),
                request.value_range,
                request.year_completed
            ],
        )
        .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
        Ok(Project {
            id,
            company_id: company_id.to_string(),
            name: request.name.clone(),
            sector: request.sector,
            value_range: request.value_range.clone(),
            year_completed: request.year_completed,
        })
    }

    pub fn add_certification(
        &self,
        company_id: &str,
        request: &AddCertificationRequest,
    ) -> Result<Certification, StorageError> {
        let conn = self.lock()?;
        let id = Uuid::new_v4().to_string();
        conn.execute(
            r#"
            INSERT INTO certifications (id, company_id, name, issuing_body)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![id, company_id, request.name, request.issuing_body],
        )
        .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
        Ok(Certification {
            id,
            company_id: company_id.to_string(),
            name: request.name.clone(),
            issuing_body: request.issuing_body.clone(),
        })
    }

    /// Company with projects and certifications loaded, as the relevance
    /// scorer consumes it.
    pub fn get_profile(&self, owner_id: &str) -> Result<Option<CompanyProfile>, StorageError> {
        let Some(company) = self.get_company_by_owner(owner_id)? else {
            return Ok(None);
        };

        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, company_id, name, sector, value_range, year_completed
                FROM projects
                WHERE company_id = ?1
                "#,
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
        let projects = stmt
            .query_map(params![company.id], map_project_row)
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, company_id, name, issuing_body
                FROM certifications
                WHERE company_id = ?1
                "#,
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
        let certifications = stmt
            .query_map(params![company.id], |row| {
                Ok(Certification {
                    id: row.get(0)?,
                    company_id: row.get(1)?,
                    name: row.get(2)?,
                    issuing_body: row.get(3)?,
                })
            })
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        Ok(Some(CompanyProfile {
            company,
            projects,
            certifications,
        }))
    }

    // --- tenders ---

    pub fn insert_tender(&self, tender: &Tender) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let documents_json = tender
            .documents
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        conn.execute(
            r#"
            INSERT INTO tenders
                (id, title, description, value, deadline, sector, source, status,
                 requirements, documents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                tender.id,
                tender.title,
                tender.description,
                tender.value,
                tender.deadline,
                tender.sector.as_str(),
                tender.source,
                tender.status.as_str(),
                tender.requirements,
                documents_json,
                tender.created_at,
                tender.updated_at,
            ],
        )
        .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
        Ok(())
    }

    pub fn get_tender(&self, id: &str) -> Result<Option<Tender>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!("{TENDER_SELECT} WHERE id = ?1"))
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        stmt.query_row(params![id], map_tender_row)
            .optional()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))
    }

    /// OPEN tenders matching the filter set. Scoring and sorting happen in
    /// the handler; only the filterable columns are pushed into SQL.
    pub fn list_open_tenders(
        &self,
        sector: Option<Sector>,
        min_value: Option<i64>,
        max_value: Option<i64>,
        deadline_from: Option<i64>,
    ) -> Result<Vec<Tender>, StorageError> {
        let conn = self.lock()?;

        let mut sql = format!("{TENDER_SELECT} WHERE status = 'OPEN'");
        let mut bindings: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(sector) = sector {
            sql.push_str(" AND sector = ?");
            bindings.push(Box::new(sector.as_str().to_string()));
        }
        if let Some(min_value) = min_value {
            sql.push_str(" AND value >= ?");
            bindings.push(Box::new(min_value));
        }
        if let Some(max_value) = max_value {
            sql.push_str(" AND value <= ?");
            bindings.push(Box::new(max_value));
        }
        if let Some(deadline_from) = deadline_from {
            sql.push_str(" AND deadline >= ?");
            bindings.push(Box::new(deadline_from));
        }

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
        let tenders = stmt
            .query_map(
                rusqlite::params_from_iter(bindings.iter().map(|b| b.as_ref())),
                map_tender_row,
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        Ok(tenders)
    }

    // --- bids ---

    pub fn create_bid(&self, tender_id: &str, company_id: &str) -> Result<Bid, StorageError> {
        let conn = self.lock()?;
        let now = Utc::now().timestamp();
        let id = Uuid::new_v4().to_string();
        conn.execute(
            r#"
            INSERT INTO bids (id, tender_id, company_id, status, content, created_at, updated_at)
            VALUES (?1, ?2, ?3, 'DRAFT', '{}', ?4, ?5)
            "#,
            params![id, tender_id, company_id, now, now],
        )
        .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
        Ok(Bid {
            id,
            tender_id: tender_id.to_string(),
            company_id: company_id.to_string(),
            status: BidStatus::Draft,
            content: BidContent::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn find_bid_by_pair(
        &self,
        tender_id: &str,
        company_id: &str,
    ) -> Result<Option<Bid>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "{BID_SELECT} WHERE tender_id = ?1 AND company_id = ?2"
            ))
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        stmt.query_row(params![tender_id, company_id], map_bid_row)
            .optional()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))
    }

    pub fn get_bid(&self, id: &str) -> Result<Option<Bid>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!("{BID_SELECT} WHERE id = ?1"))
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        stmt.query_row(params![id], map_bid_row)
            .optional()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))
    }

    pub fn list_bids_for_company(&self, company_id: &str) -> Result<Vec<Bid>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "{BID_SELECT} WHERE company_id = ?1 ORDER BY updated_at DESC"
            ))
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        let bids = stmt
            .query_map(params![company_id], map_bid_row)
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        Ok(bids)
    }

    /// Single idempotent overwrite of the content blob; retrying is safe.
    pub fn update_bid_content(&self, id: &str, content: &BidContent) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let content_json = serde_json::to_string(content)?;
        let updated = conn
            .execute(
                "UPDATE bids SET content = ?1, updated_at = ?2 WHERE id = ?3",
                params![content_json, Utc::now().timestamp(), id],
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
        if updated == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    pub fn update_bid_status(&self, id: &str, status: BidStatus) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let updated = conn
            .execute(
                "UPDATE bids SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.as_str(), Utc::now().timestamp(), id],
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
        if updated == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

const TENDER_SELECT: &str = r#"
SELECT id, title, description, value, deadline, sector, source, status,
       requirements, documents, created_at, updated_at
FROM tenders
"#;

const BID_SELECT: &str = r#"
SELECT id, tender_id, company_id, status, content, created_at, updated_at
FROM bids
"#;

fn map_company_row(row: &Row<'_>) -> rusqlite::Result<Company> {
    let sectors_json: String = row.get(3)?;
    let tags_json: String = row.get(4)?;
    Ok(Company {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        sectors: serde_json::from_str(&sectors_json).unwrap_or_default(),
        capability_tags: serde_json::from_str(&tags_json).unwrap_or_default(),
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn map_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    let sector_str: String = row.get(3)?;
    Ok(Project {
        id: row.get(0)?,
        company_id: row.get(1)?,
        name: row.get(2)?,
        sector: Sector::parse(&sector_str).unwrap_or(Sector::It),
        value_range: row.get(4)?,
        year_completed: row.get(5)?,
    })
}

fn map_tender_row(row: &Row<'_>) -> rusqlite::Result<Tender> {
    let sector_str: String = row.get(5)?;
    let status_str: String = row.get(7)?;
    let documents_json: Option<String> = row.get(9)?;
    Ok(Tender {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        value: row.get(3)?,
        deadline: row.get(4)?,
        sector: Sector::parse(&sector_str).unwrap_or(Sector::It),
        source: row.get(6)?,
        status: TenderStatus::parse(&status_str).unwrap_or(TenderStatus::Open),
        requirements: row.get(8)?,
        documents: documents_json.and_then(|json| serde_json::from_str(&json).ok()),
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

fn map_bid_row(row: &Row<'_>) -> rusqlite::Result<Bid> {
    let status_str: String = row.get(3)?;
    let content_json: String = row.get(4)?;
    Ok(Bid {
        id: row.get(0)?,
        tender_id: row.get(1)?,
        company_id: row.get(2)?,
        status: BidStatus::parse(&status_str).unwrap_or(BidStatus::Draft),
        content: serde_json::from_str(&content_json).unwrap_or_default(),
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
