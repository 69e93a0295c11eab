// Latest-quicksave selection over a store listing

use super::SaveStore;
use super::types::SaveFileRecord;
use crate::error::StoreError;
use crate::naming::Matcher;

/// Most recently modified record whose name the matcher accepts
///
/// Equal timestamps keep the record listed first.
pub fn latest_matching<'a, I>(records: I, matcher: &Matcher) -> Option<SaveFileRecord>
where
    I: IntoIterator<Item = &'a SaveFileRecord>,
{
    records
        .into_iter()
        .filter(|r| matcher.matches(&r.name))
        .fold(None, |best: Option<&SaveFileRecord>, r| match best {
            Some(b) if b.last_modified >= r.last_modified => Some(b),
            _ => Some(r),
        })
        .cloned()
}

/// List the store and pick the latest rotation member
pub fn find_latest<S>(store: &S, matcher: &Matcher) -> Result<Option<SaveFileRecord>, StoreError>
where
    S: SaveStore + ?Sized,
{
    let records = store.list_save_records()?;
    let latest = latest_matching(&records, matcher);
    tracing::debug!(
        listed = records.len(),
        latest = latest.as_ref().map(|r| r.name.as_str()),
        "selected latest quicksave"
    );
    Ok(latest)
}
