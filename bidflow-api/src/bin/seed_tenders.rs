use anyhow::Context;
use bidflow_api::config::ApiConfig;
use bidflow_api::helpers::database::initialize_database;
use bidflow_api::storage::SqliteStorage;
use bidflow_types::{Sector, Tender, TenderDocument, TenderStatus};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "seed-tenders")]
#[command(about = "Populate the tender catalogue with deterministic mock tenders")]
struct Args {
    /// Database file to seed (defaults to the configured path)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Number of IT tenders to create
    #[arg(long, default_value_t = 30)]
    it: usize,

    /// Number of Construction tenders to create
    #[arg(long, default_value_t = 20)]
    construction: usize,
}

const IT_TAGS: &[&str] = &[
    "Cloud Services",
    "Cybersecurity",
    "Software Development",
    "Data Analytics",
    "IT Consulting",
    "Digital Transformation",
    "Network Infrastructure",
    "Application Development",
    "DevOps",
    "System Integration",
];

const CONSTRUCTION_TAGS: &[&str] = &[
    "Renovation",
    "Infrastructure",
    "New Build",
    "Facility Management",
    "Structural Engineering",
    "Project Management",
    "Building Services",
    "Civil Engineering",
    "Mechanical & Electrical",
    "Sustainable Construction",
];

const IT_DOCUMENTS: &[&str] = &[
    "Technical Specification",
    "Security Requirements",
    "Data Protection Impact Assessment",
    "Service Level Agreement",
    "Integration Requirements",
    "Tender Notice",
    "Evaluation Criteria",
    "Contract Terms",
];

const CONSTRUCTION_DOCUMENTS: &[&str] = &[
    "Bill of Quantities",
    "Technical Drawings",
    "Site Safety Plan",
    "Environmental Impact Assessment",
    "Quality Assurance Plan",
    "Tender Notice",
    "Contract Conditions",
    "Method Statement",
];

const IT_PREFIXES: &[&str] = &[
    "Digital Transformation Platform",
    "Cloud Migration Services",
    "Cybersecurity Assessment",
    "Software Development",
    "IT Infrastructure Upgrade",
    "Data Analytics Platform",
    "Network Security Enhancement",
    "Application Modernization",
    "Enterprise System Integration",
    "IT Support Services",
];

const IT_CLIENTS: &[&str] = &[
    "NHS Trust",
    "Local Council",
    "Government Agency",
    "Public University",
    "Police Force",
];

const CONSTRUCTION_PREFIXES: &[&str] = &[
    "Building Renovation",
    "Infrastructure Development",
    "New Build Project",
    "Facility Upgrade",
    "Road Construction",
    "School Refurbishment",
    "Office Building Construction",
    "Bridge Maintenance",
    "Public Facility Development",
    "Sustainable Building",
];

const CONSTRUCTION_LOCATIONS: &[&str] = &[
    "Central London",
    "Greater Manchester",
    "Birmingham",
    "Leeds",
    "Glasgow",
    "Bristol",
];

const IT_CERTIFICATIONS: &[&str] = &[
    "ISO 27001",
    "Cyber Essentials Plus",
    "ISO 9001",
    "CREST",
    "G-Cloud",
];

const CONSTRUCTION_CERTIFICATIONS: &[&str] = &[
    "Constructionline Gold",
    "ISO 9001",
    "ISO 14001",
    "OHSAS 18001",
    "CHAS Accreditation",
    "SafeContractor",
];

fn pick<'a>(catalogue: &'a [&'a str], start: usize, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| catalogue[(start + i) % catalogue.len()].to_string())
        .collect()
}

fn documents(catalogue: &[&str], index: usize) -> Vec<TenderDocument> {
    pick(catalogue, index, 4 + index % 3)
        .into_iter()
        .map(|name| TenderDocument {
            name,
            reference: "#".to_string(),
        })
        .collect()
}

fn it_tender(index: usize, now: i64) -> Tender {
    let tags = pick(IT_TAGS, index, 3 + index % 3);
    let certifications = pick(IT_CERTIFICATIONS, index, 1 + index % 3);
    let requirements = serde_json::json!({
        "tags": tags,
        "certifications": certifications,
        "experience": [format!("{} years delivering public sector IT programmes", 3 + index % 8)],
        "technical": [format!("Integration with {} existing systems", 2 + index % 4)],
    });

    Tender {
        id: format!("tender-it-{index}"),
        title: format!(
            "{} for {}",
            IT_PREFIXES[index % IT_PREFIXES.len()],
            IT_CLIENTS[index % IT_CLIENTS.len()]
        ),
        description: "The solution must meet stringent security and compliance \
            requirements, including GDPR compliance and government security standards. \
            The successful bidder will work closely with internal stakeholders to \
            ensure seamless integration with existing systems."
            .to_string(),
        value: 50_000 + (index as i64 * 137_000) % 1_950_000,
        deadline: now + (7 + (index as i64 * 13) % 173) * 86_400,
        sector: Sector::It,
        source: "TED".to_string(),
        status: TenderStatus::Open,
        requirements: Some(requirements.to_string()),
        documents: Some(documents(IT_DOCUMENTS, index)),
        created_at: now,
        updated_at: now,
    }
}

fn construction_tender(index: usize, now: i64) -> Tender {
    let tags = pick(CONSTRUCTION_TAGS, index, 3 + index % 3);
    let certifications = pick(CONSTRUCTION_CERTIFICATIONS, index, 2 + index % 3);
    let requirements = serde_json::json!({
        "tags": tags,
        "certifications": certifications,
        "experience": [format!("{} years of comparable construction projects", 5 + index % 11)],
        "deliverables": ["Method statement", "Programme of works", "Site safety plan"],
    });

    Tender {
        id: format!("tender-construction-{index}"),
        title: format!(
            "{} - {}",
            CONSTRUCTION_PREFIXES[index % CONSTRUCTION_PREFIXES.len()],
            CONSTRUCTION_LOCATIONS[index % CONSTRUCTION_LOCATIONS.len()]
        ),
        description: "The project requires adherence to all relevant building \
            regulations, health and safety standards, and environmental guidelines. \
            Work must be completed to the highest quality standards with minimal \
            disruption to ongoing operations."
            .to_string(),
        value: 100_000 + (index as i64 * 241_000) % 4_900_000,
        deadline: now + (14 + (index as i64 * 17) % 166) * 86_400,
        sector: Sector::Construction,
        source: "TED".to_string(),
        status: TenderStatus::Open,
        requirements: Some(requirements.to_string()),
        documents: Some(documents(CONSTRUCTION_DOCUMENTS, index)),
        created_at: now,
        updated_at: now,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let db_path = match args.database {
        Some(path) => path,
        None => {
            let (config, _) = ApiConfig::load().context("failed to load configuration")?;
            config.database.path
        }
    };

    let connection = initialize_database(&db_path).context("failed to initialize database")?;
    let storage = SqliteStorage::new(connection);

    let now = chrono::Utc::now().timestamp();
    let mut created = 0usize;

    for i in 1..=args.it {
        if storage.insert_tender(&it_tender(i, now)).is_ok() {
            created += 1;
        }
    }
    for i in 1..=args.construction {
        if storage.insert_tender(&construction_tender(i, now)).is_ok() {
            created += 1;
        }
    }

    info!(
        "Created {created} mock tenders ({} IT, {} Construction) in {}",
        args.it,
        args.construction,
        db_path.display()
    );
    Ok(())
}
