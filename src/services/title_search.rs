use crate::{
    error::AppResult,
    models::{ApiRecord, RecordKind, Title},
    services::providers::CatalogProvider,
};

/// Searches the catalog and keeps only movies and TV shows.
///
/// The remote search mixes in people and other record kinds; the filter is
/// applied here, independent of whatever the provider does server side.
pub async fn search_titles(provider: &dyn CatalogProvider, query: &str) -> AppResult<Vec<Title>> {
    let records = provider.search(query).await?;
    Ok(browsable_titles(records))
}

/// Drops every record that is not a movie or a show. Records without a
/// discriminator are dropped as well.
pub fn browsable_titles(records: Vec<ApiRecord>) -> Vec<Title> {
    let total = records.len();
    let titles: Vec<Title> = records
        .into_iter()
        .filter_map(|record| {
            let kind = record.media_type.as_deref().map(RecordKind::parse)?;
            record.into_title(kind)
        })
        .collect();

    if titles.len() < total {
        tracing::debug!(
            dropped = total - titles.len(),
            kept = titles.len(),
            "Dropped non-browsable search records"
        );
    }

    titles
}
