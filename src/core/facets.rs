use std::collections::BTreeSet;

use crate::models::{FacetOption, Facets, Location, MaterialKey};

/// Location attribute a facet can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetAttribute {
    City,
    Type,
    Material,
}

/// Distinct values of one attribute across the collection
pub fn distinct_values(locations: &[Location], attribute: FacetAttribute) -> Vec<FacetOption> {
    match attribute {
        FacetAttribute::City => distinct_cities(locations),
        FacetAttribute::Type => distinct_types(locations),
        FacetAttribute::Material => distinct_materials(locations),
    }
}

/// City facet: sorted distinct cities, labelled as stored
pub fn distinct_cities(locations: &[Location]) -> Vec<FacetOption> {
    distinct_strings(locations.iter().filter_map(|l| l.city.as_deref()))
        .into_iter()
        .map(|city| FacetOption {
            value: normalize_value(city),
            label: city.to_string(),
        })
        .collect()
}

/// Facility type facet: sorted distinct types with title-cased labels
pub fn distinct_types(locations: &[Location]) -> Vec<FacetOption> {
    distinct_strings(locations.iter().filter_map(|l| l.location_type.as_deref()))
        .into_iter()
        .map(|location_type| FacetOption {
            value: normalize_value(location_type),
            label: format_label(location_type),
        })
        .collect()
}

/// Material facet: every material at least one location accepts
pub fn distinct_materials(locations: &[Location]) -> Vec<FacetOption> {
    MaterialKey::ALL
        .into_iter()
        .filter(|material| {
            locations
                .iter()
                .any(|l| l.accepted_materials.accepts(*material))
        })
        .map(|material| FacetOption {
            value: material.key().to_string(),
            label: material_label(material.key()),
        })
        .collect()
}

/// All three facets at once
pub fn all_facets(locations: &[Location]) -> Facets {
    Facets {
        cities: distinct_cities(locations),
        facility_types: distinct_types(locations),
        materials: distinct_materials(locations),
    }
}

fn distinct_strings<'a>(values: impl Iterator<Item = &'a str>) -> BTreeSet<&'a str> {
    values.collect()
}

/// Facet key: lowercase with whitespace removed
pub fn normalize_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Display label for a material key
pub fn material_label(key: &str) -> String {
    match key {
        "plastic" => "Plastic".to_string(),
        "paper" => "Paper".to_string(),
        "cardboard" => "Cardboard".to_string(),
        "metal" => "Metal".to_string(),
        "ewaste" => "E-Waste".to_string(),
        "cartons" => "Cartons".to_string(),
        "motorOil" => "Motor Oil".to_string(),
        "cans" => "Cans".to_string(),
        other => format_label(other),
    }
}

/// Title-case a raw attribute value
///
/// Words break between a lowercase letter and a following uppercase letter,
/// at underscores and at whitespace. Each word is then capitalised with the
/// rest lowercased: `eDrop_off` becomes `E Drop Off`.
pub fn format_label(raw: &str) -> String {
    let mut spaced = String::with_capacity(raw.len() + 4);
    let mut previous: Option<char> = None;

    for c in raw.chars() {
        if c == '_' {
            spaced.push(' ');
        } else {
            if previous.is_some_and(|p| p.is_ascii_lowercase()) && c.is_ascii_uppercase() {
                spaced.push(' ');
            }
            spaced.push(c);
        }
        previous = Some(c);
    }

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
