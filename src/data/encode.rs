use std::collections::BTreeMap;

use super::model::{
    AlignedRow, Category, CategoryChoices, CategoryOption, FeatureColumns, HouseInputs,
    InputRecord, BATHROOMS, CAR_PARKS, ROOMS, SIZE,
};

// ---------------------------------------------------------------------------
// Option derivation
// ---------------------------------------------------------------------------

/// Selectable options of `category`: every feature column starting with the
/// category's prefix, prefix stripped, in column order.
pub fn category_options(columns: &FeatureColumns, category: Category) -> Vec<CategoryOption> {
    let prefix = category.prefix();
    columns
        .iter()
        .filter_map(|name| name.strip_prefix(prefix))
        .map(|suffix| CategoryOption {
            prefix,
            suffix: suffix.to_string(),
        })
        .collect()
}

/// Options for all categories, computed once after loading.
pub fn all_category_options(columns: &FeatureColumns) -> CategoryChoices {
    CategoryChoices(
        Category::ALL
            .iter()
            .map(|&c| (c, category_options(columns, c)))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Record assembly and alignment
// ---------------------------------------------------------------------------

/// Numeric inputs verbatim plus one `1.0` indicator per selected option.
pub fn assemble_record(inputs: &HouseInputs) -> InputRecord {
    let mut values = BTreeMap::new();
    values.insert(ROOMS.to_string(), f64::from(inputs.rooms));
    values.insert(BATHROOMS.to_string(), f64::from(inputs.bathrooms));
    values.insert(CAR_PARKS.to_string(), f64::from(inputs.car_parks));
    values.insert(SIZE.to_string(), f64::from(inputs.size));

    for category in Category::ALL {
        if let Some(option) = inputs.selection(category) {
            values.insert(option.column_name(), 1.0);
        }
    }
    InputRecord(values)
}

/// Reindex `record` against `columns`, filling absent names with zero.
/// Names the columns do not know are dropped.
pub fn align(record: &InputRecord, columns: &FeatureColumns) -> AlignedRow {
    AlignedRow(
        columns
            .iter()
            .map(|name| record.get(name).unwrap_or(0.0))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> FeatureColumns {
        FeatureColumns::new(names.iter().map(|s| s.to_string()).collect())
    }

    fn sample_columns() -> FeatureColumns {
        columns(&[
            "Rooms",
            "Bathrooms",
            "Car Parks",
            "Size",
            "Location_A",
            "Location_B",
            "Property Type_X",
            "Furnishing_F1",
        ])
    }

    fn option(category: Category, suffix: &str) -> Option<CategoryOption> {
        Some(CategoryOption {
            prefix: category.prefix(),
            suffix: suffix.into(),
        })
    }

    #[test]
    fn options_follow_column_order() {
        let cols = columns(&[
            "Location_Cheras",
            "Rooms",
            "Location_Ampang",
            "Furnishing_Unfurnished",
            "Location_Bangsar",
        ]);
        let suffixes: Vec<String> = category_options(&cols, Category::Location)
            .into_iter()
            .map(|o| o.suffix)
            .collect();
        assert_eq!(suffixes, ["Cheras", "Ampang", "Bangsar"]);
    }

    #[test]
    fn options_round_trip_through_prefix() {
        let cols = sample_columns();
        for category in Category::ALL {
            let options = category_options(&cols, category);
            for opt in &options {
                assert!(cols.iter().any(|c| c == opt.column_name()));
            }
            let prefixed = cols.iter().filter(|n| n.starts_with(category.prefix())).count();
            assert_eq!(options.len(), prefixed);
        }
    }

    #[test]
    fn options_only_match_leading_prefix() {
        // "Old Location_X" contains the prefix but does not start with it.
        let cols = columns(&["Old Location_X", "Location_Y"]);
        let options = category_options(&cols, Category::Location);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].suffix, "Y");
    }

    #[test]
    fn missing_category_yields_no_options() {
        let cols = columns(&["Rooms", "Size", "Location_A"]);
        assert!(category_options(&cols, Category::Furnishing).is_empty());
        let all = all_category_options(&cols);
        assert_eq!(all.for_category(Category::Location).len(), 1);
        assert!(all.for_category(Category::PropertyType).is_empty());
    }

    #[test]
    fn assembles_reference_row() {
        let cols = sample_columns();
        let inputs = HouseInputs {
            rooms: 3,
            bathrooms: 2,
            car_parks: 1,
            size: 1200,
            location: option(Category::Location, "A"),
            property_type: option(Category::PropertyType, "X"),
            furnishing: option(Category::Furnishing, "F1"),
        };
        let row = align(&assemble_record(&inputs), &cols);
        assert_eq!(row.0, vec![3.0, 2.0, 1.0, 1200.0, 1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn alignment_keeps_column_order_for_any_selection() {
        let cols = sample_columns();
        let locations = [None, option(Category::Location, "A"), option(Category::Location, "B")];
        for location in locations {
            for furnishing in [None, option(Category::Furnishing, "F1")] {
                let inputs = HouseInputs {
                    location: location.clone(),
                    furnishing: furnishing.clone(),
                    ..HouseInputs::default()
                };
                let record = assemble_record(&inputs);
                let row = align(&record, &cols);
                assert_eq!(row.0.len(), cols.len());
                for (value, name) in row.0.iter().zip(cols.iter()) {
                    assert_eq!(*value, record.get(name).unwrap_or(0.0), "{name}");
                }
                let indicators: f64 = row.0[4..].iter().sum();
                let selected = usize::from(location.is_some()) + usize::from(furnishing.is_some());
                assert_eq!(indicators, selected as f64);
            }
        }
    }

    #[test]
    fn unknown_columns_are_dropped() {
        let cols = columns(&["Rooms", "Size"]);
        let inputs = HouseInputs {
            location: option(Category::Location, "Nowhere"),
            ..HouseInputs::default()
        };
        let row = align(&assemble_record(&inputs), &cols);
        assert_eq!(row.0, vec![2.0, 1500.0]);
    }
}
