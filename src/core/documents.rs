use crate::domain::model::PlrRecord;

/// Keeps only the published documents of a restriction.
pub fn filter_published_documents(mut plr: PlrRecord) -> PlrRecord {
    let (published, dropped): (Vec<_>, Vec<_>) =
        plr.documents.into_iter().partition(|document| document.published);
    for document in &dropped {
        tracing::debug!("filtering out non-published document {:?}", document.title);
    }
    plr.documents = published;
    plr
}

/// Keeps the documents that are not restricted to another municipality than `fosnr`.
pub fn filter_documents_by_fosnr(mut plr: PlrRecord, fosnr: u32) -> PlrRecord {
    let (relevant, dropped): (Vec<_>, Vec<_>) = plr
        .documents
        .into_iter()
        .partition(|document| document.applies_to(fosnr));
    for document in &dropped {
        tracing::debug!(
            "filtering out document {:?} (only relevant for municipality {:?})",
            document.title,
            document.only_in_municipality
        );
    }
    plr.documents = relevant;
    plr
}
