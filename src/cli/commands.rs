//! `show` and `counts` commands

use super::error::CliError;
use super::output::format_json;
use crate::config::Args;
use crate::content::ContentFacade;
use crate::revalidate::ContentCache;
use crate::revalidate::cache::ContentResource;

/// Resolve a resource name as typed on the command line
pub fn resource_by_name(name: &str) -> Result<ContentResource, CliError> {
    match name.trim().to_lowercase().as_str() {
        "settings" | "site-settings" => Ok(ContentResource::SiteSettings),
        "home" | "home-page" => Ok(ContentResource::HomePage),
        "speakers" => Ok(ContentResource::Speakers),
        "team" => Ok(ContentResource::Team),
        "partners" => Ok(ContentResource::Partners),
        "supporters" => Ok(ContentResource::Supporters),
        other => Err(CliError::InvalidArgument(format!(
            "Unknown resource: {}. Expected settings, home, speakers, team, partners or supporters",
            other
        ))),
    }
}

/// Handle the show command
pub async fn handle_show(content: &ContentFacade, resource: &str) -> Result<String, CliError> {
    let resource = resource_by_name(resource)?;
    let cache = ContentCache::new(content.clone());
    let snapshot = cache.get(resource).await?;
    Ok(format_json(&snapshot))
}

/// Handle the counts command
#[cfg(feature = "sanity-backend")]
pub async fn handle_counts(args: &Args) -> Result<String, CliError> {
    use super::output::format_counts;
    use crate::config::ConfigError;
    use crate::content::SanityContentSource;

    let config = args.sanity_config().ok_or(ConfigError::MissingSanityProject)?;
    let source = SanityContentSource::from_config(config)?;
    let counts = source.document_counts().await?;
    Ok(format_counts(&counts))
}

#[cfg(not(feature = "sanity-backend"))]
pub async fn handle_counts(_args: &Args) -> Result<String, CliError> {
    Err(CliError::InvalidArgument(
        "counts needs the sanity-backend feature".to_string(),
    ))
}
