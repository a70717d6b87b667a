use crate::{
    error::EngineError,
    hierarchy::Snapshot,
    locator::{candidates, rank, LocatorEntry},
    normalize::{normalize, RawDump},
    pageobject::{base_name, emit, table::LocatorTable, NameAllocator},
    trace::{EngineEvent, TraceLogger},
};

pub mod cli;
pub mod error;
pub mod heal;
pub mod hierarchy;
pub mod locator;
pub mod normalize;
pub mod pageobject;
pub mod session;
pub mod trace;

/// The two artifacts of one extraction run: the page-object source text
/// and the locator table it was rendered from. File placement is the
/// caller's responsibility.
#[derive(Debug, Clone)]
pub struct GeneratedPageObject {
    pub source: String,
    pub table: LocatorTable,
}

/// Run candidates -> rank over every element-worthy node of a snapshot.
///
/// Entries come out in pre-order, named deterministically, each carrying
/// its primary locator, ordered fallbacks, and the text anchor used later
/// for healing. Pure over the snapshot: repeated calls produce identical
/// tables.
pub fn build_locator_table(
    snapshot: &Snapshot,
    page_name: &str,
    tracer: &TraceLogger,
) -> LocatorTable {
    let mut names = NameAllocator::new();
    let mut entries: Vec<LocatorEntry> = Vec::new();

    for node in snapshot.iter() {
        if !locator::is_element_worthy(snapshot, node.id) {
            continue;
        }

        let Some(ranked) = rank(candidates(snapshot, node.id, tracer)) else {
            continue;
        };

        let element_name = names.allocate(base_name(node, entries.len()));

        if ranked.low_confidence {
            tracer.log(
                &EngineEvent::ambiguous_locator()
                    .with_element(&element_name)
                    .with_strategy(ranked.primary.strategy)
                    .with_value(&ranked.primary.value),
            );
        }

        entries.push(LocatorEntry {
            element_name,
            primary: ranked.primary,
            fallbacks: ranked.fallbacks,
            original_text: node.text_or_label().map(str::to_string),
            low_confidence: ranked.low_confidence,
        });
    }

    LocatorTable {
        page_name: page_name.to_string(),
        platform: snapshot.platform,
        snapshot_fingerprint: snapshot.fingerprint(),
        entries,
    }
}

/// Full extraction pipeline: normalize a raw dump, build the locator
/// table, render the page object.
pub fn generate_page_object(
    raw: &RawDump,
    page_name: &str,
    tracer: &TraceLogger,
) -> Result<GeneratedPageObject, EngineError> {
    let snapshot = normalize(raw)?;
    let table = build_locator_table(&snapshot, page_name, tracer);
    let source = emit(&table);
    Ok(GeneratedPageObject { source, table })
}
