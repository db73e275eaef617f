use dumpxml_format::{is_valid_element_name, is_xml_char, FieldPath, FieldRule, FieldRules};
use proptest::prelude::*;

proptest! {
    #[test]
    fn generated_names_are_valid(name in "[A-Za-z_][A-Za-z0-9_.-]{0,16}") {
        prop_assert!(is_valid_element_name(&name));
    }

    #[test]
    fn leading_digit_or_space_is_invalid(name in "[0-9 ][a-z]{0,8}") {
        prop_assert!(!is_valid_element_name(&name));
    }

    #[test]
    fn combining_marks_and_middle_dot_continue_names(name in "[a-z][\\x{300}-\\x{36F}\\x{B7}\\x{203F}]{1,4}") {
        prop_assert!(is_valid_element_name(&name));
    }

    #[test]
    fn symbols_outside_name_ranges_are_invalid(name in "[a-z]{1,4}[\\x{B2}\\x{B3}\\x{B9}\\x{D7}\\x{F7}][a-z]{0,4}") {
        prop_assert!(!is_valid_element_name(&name));
    }

    #[test]
    fn name_continuation_chars_cannot_start_names(name in "[\\x{300}-\\x{36F}\\x{B7}0-9.-][a-z]{0,6}") {
        prop_assert!(!is_valid_element_name(&name));
    }

    #[test]
    fn control_characters_are_not_xml_chars(c in "[\\x{0}-\\x{8}\\x{B}\\x{C}\\x{E}-\\x{1F}]") {
        let c = c.chars().next().unwrap();
        prop_assert!(!is_xml_char(c));
    }

    #[test]
    fn singular_drops_one_char(key in "\\PC{1,12}") {
        let singular = FieldRules::singular(&key);
        prop_assert_eq!(singular.chars().count() + 1, key.chars().count());
        prop_assert!(key.starts_with(singular));
    }

    #[test]
    fn added_keys_are_wrapped(key in "[a-z]{2,10}") {
        prop_assume!(key != "all");
        let rules = FieldRules::default().with_array_field(key.clone());
        prop_assert_eq!(rules.rule_for(&key), FieldRule::WrapAsPlural);
        prop_assert!(rules.validate().is_ok());
    }

    #[test]
    fn path_display_joins_segments(keys in prop::collection::vec("[a-z]{1,6}", 1..5), idx in 0usize..10) {
        let mut path = FieldPath::root();
        for key in &keys {
            path = path.child(key);
        }
        let path = path.index(idx);
        prop_assert_eq!(path.to_string(), format!("{}[{}]", keys.join("."), idx));
    }
}
