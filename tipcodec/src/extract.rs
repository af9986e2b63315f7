//! Tooltip extraction from application objects.
//!
//! An element contributes its explicit `ToolTipML` property when it has one.
//! Elements without it can get a generated proposal built from their caption
//! or source expression; generated text carries the
//! [`GENERATED_PREFIX`](crate::property::GENERATED_PREFIX) marker so it never
//! flows back into objects unreviewed.

use tracing::debug;

use crate::{
    error::Error,
    property::{self, GENERATED_PREFIX, SOURCE_EXPR_LANGUAGE},
    traits::{ApplicationObject, ObjectElement},
    types::{MultiLanguageText, PropertyKind, Tooltip},
};

/// Collects the tooltips of every element of `object`.
///
/// An element whose properties cannot be read is skipped; the remaining
/// elements are still extracted.
pub fn extract<O: ApplicationObject>(object: &O, generate_tooltips: bool) -> Vec<Tooltip> {
    let mut tooltips = Vec::new();
    for element in object.elements() {
        match extract_element(element, generate_tooltips) {
            Ok(Some(tooltip)) => tooltips.push(tooltip),
            Ok(None) => {}
            Err(e) => debug!(
                "skipping element {} {} of {}: {}",
                element.element_type(),
                element.id(),
                object.identity(),
                e
            ),
        }
    }
    tooltips
}

/// Extracts the tooltip of a single element.
///
/// Returns `Ok(None)` when the element has nothing worth exporting.
pub fn extract_element<E: ObjectElement>(
    element: &E,
    generate_tooltips: bool,
) -> Result<Option<Tooltip>, Error> {
    if let Some(raw) = element.string_property(PropertyKind::ToolTipMl)? {
        let tooltip = Tooltip::with_text(
            element.element_type(),
            element.id(),
            property::decode(&raw),
        );
        if tooltip.to_property(false).is_empty() {
            return Ok(None);
        }
        return Ok(Some(tooltip));
    }

    if !generate_tooltips {
        return Ok(None);
    }
    Ok(generate(element)?.filter(|tooltip| !tooltip.to_property(true).is_empty()))
}

/// Builds a generated tooltip from the element's caption, or failing that
/// its source expression.
pub fn generate<E: ObjectElement>(element: &E) -> Result<Option<Tooltip>, Error> {
    let candidate = if let Some(caption) = element.string_property(PropertyKind::CaptionMl)? {
        property::decode(&caption)
    } else if let Some(source) = element.string_property(PropertyKind::SourceExpr)? {
        let mut text = MultiLanguageText::new();
        text.insert(SOURCE_EXPR_LANGUAGE, source);
        text
    } else {
        return Ok(None);
    };

    if property::encode(&candidate, true).is_empty() {
        return Ok(None);
    }

    let generated: MultiLanguageText = candidate
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(language, text)| (language, format!("{}{}", GENERATED_PREFIX, text)))
        .collect();
    if generated.is_empty() {
        return Ok(None);
    }

    Ok(Some(Tooltip::with_text(
        element.element_type(),
        element.id(),
        generated,
    )))
}
