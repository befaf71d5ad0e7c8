use crate::types::{Record, Selection};

/// Rows matching the selected city AND gender. A cleared control matches
/// everything; matching is exact and case-sensitive.
pub fn filter<'a>(records: &'a [Record], selection: &Selection) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| selection.city().is_none_or(|city| r.city == city))
        .filter(|r| selection.gender().is_none_or(|gender| r.gender == gender))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordSet;
    use chrono::NaiveDate;

    fn sample() -> RecordSet {
        let d = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        RecordSet::new(vec![
            Record::new("Yangon", "Male", "Food and beverages", 100.0, 8.0, d),
            Record::new("Yangon", "Female", "Health and beauty", 50.0, 6.0, d),
            Record::new("Naypyitaw", "Male", "Food and beverages", 200.0, 9.0, d),
        ])
    }

    fn sel(city: Option<&str>, gender: Option<&str>) -> Selection {
        Selection::new(city.map(String::from), gender.map(String::from))
    }

    #[test]
    fn no_filter_returns_everything_in_order() {
        let set = sample();
        let rows = filter(set.records(), &Selection::default());
        assert_eq!(rows.len(), set.len());
        for (row, original) in rows.iter().zip(set.records()) {
            assert!(std::ptr::eq(*row, original));
        }
    }

    #[test]
    fn empty_string_equals_no_filter() {
        let set = sample();
        let blank = filter(set.records(), &sel(Some(""), Some("")));
        let none = filter(set.records(), &Selection::default());
        assert_eq!(blank, none);
    }

    #[test]
    fn blank_fields_built_directly_equal_no_filter() {
        let set = sample();
        let blank = Selection {
            city: Some(String::new()),
            gender: Some("   ".to_string()),
        };
        let rows = filter(set.records(), &blank);
        assert_eq!(rows.len(), set.len());
        assert_eq!(rows, filter(set.records(), &Selection::default()));

        let city_only = Selection {
            city: Some("Yangon".to_string()),
            gender: Some(String::new()),
        };
        assert_eq!(filter(set.records(), &city_only).len(), 2);
    }

    #[test]
    fn filters_compose_with_and() {
        let set = sample();
        assert_eq!(filter(set.records(), &sel(Some("Yangon"), None)).len(), 2);
        assert_eq!(filter(set.records(), &sel(None, Some("Male"))).len(), 2);

        let both = filter(set.records(), &sel(Some("Yangon"), Some("Male")));
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].total, 100.0);
    }

    #[test]
    fn matching_is_exact() {
        let set = sample();
        assert!(filter(set.records(), &sel(Some("yangon"), None)).is_empty());
        assert!(filter(set.records(), &sel(Some("Yang"), None)).is_empty());
        assert!(filter(set.records(), &sel(Some("Naypyitaw"), Some("Female"))).is_empty());
    }

    #[test]
    fn never_grows_the_set() {
        let set = sample();
        let cities = [None, Some("Yangon"), Some("Naypyitaw"), Some("Mandalay"), Some("")];
        let genders = [None, Some("Male"), Some("Female"), Some("")];
        for city in cities {
            for gender in genders {
                assert!(filter(set.records(), &sel(city, gender)).len() <= set.len());
            }
        }
    }
}
