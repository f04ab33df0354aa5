use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical job listing shared by both sources after remapping.
///
/// Fields a source doesn't carry stay absent in the serialized output;
/// nothing is validated or filled in. Unrecognized fields from the JSON
/// source survive verbatim through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope returned by the JSON job-board API. Listings live under `data`.
#[derive(Debug, Deserialize)]
pub struct ArbeitnowResponse {
    pub data: Vec<JobListing>,
}

/// One `<job>` element of the XML job feed, before remapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct XmlJobRecord {
    #[serde(rename = "@id")]
    pub id: String,
    pub title: Option<String>,
    #[serde(rename = "company-name")]
    pub company_name: Option<String>,
    pub pubdate: Option<String>,
    #[serde(rename = "job-types")]
    pub job_types: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub region: Option<String>,
    pub expire: Option<String>,
    #[serde(rename = "company-logo-url")]
    pub company_logo_url: Option<String>,
}

/// Parsed XML feed document: `<jobs><job id="...">...</job></jobs>`.
#[derive(Debug, Default, Deserialize)]
pub struct JobFeed {
    #[serde(rename = "job", default)]
    pub jobs: Vec<XmlJobRecord>,
}

impl From<XmlJobRecord> for JobListing {
    fn from(job: XmlJobRecord) -> Self {
        let mut extra = Map::new();
        // Feed fields without a canonical name pass through under their
        // original names.
        if let Some(region) = job.region {
            extra.insert("region".to_string(), Value::String(region));
        }
        if let Some(expire) = job.expire {
            extra.insert("expire".to_string(), Value::String(expire));
        }
        if let Some(logo) = job.company_logo_url {
            extra.insert("company-logo-url".to_string(), Value::String(logo));
        }

        JobListing {
            title: job.title,
            company_name: job.company_name,
            pubdate: job.pubdate,
            // The feed carries a single text value; canonically a sequence
            job_types: job.job_types.map(|t| vec![t]),
            // The feed's id attribute becomes the slug
            slug: Some(job.id),
            url: job.url,
            description: job.description,
            location: None,
            remote: None,
            tags: None,
            created_at: None,
            extra,
        }
    }
}

pub fn parse_job_feed(xml: &str) -> Result<JobFeed, quick_xml::DeError> {
    quick_xml::de::from_str(xml)
}

/// Merge both sources into one sequence: feed listings first, API listings
/// second, each in source order. No dedup - duplicate slugs are kept.
pub fn merge_listings(
    feed_jobs: Vec<XmlJobRecord>,
    api_jobs: Vec<JobListing>,
) -> Vec<JobListing> {
    feed_jobs
        .into_iter()
        .map(JobListing::from)
        .chain(api_jobs)
        .collect()
}

/// First listing whose slug matches exactly, in merge order.
pub fn find_by_slug<'a>(listings: &'a [JobListing], slug: &str) -> Option<&'a JobListing> {
    listings.iter().find(|job| job.slug.as_deref() == Some(slug))
}
