//! Selector Rewriter Tests

mod utils;

use scopeify::{rewrite, MappingCategory, NameMapping, ScopeOptions, ScopeWarning};
use utils::assert_mapping;

fn scoper(name: &str) -> String {
    format!("{}_1", name)
}

fn rewrite_list(selector_list: &str, options: &ScopeOptions) -> (String, NameMapping, Vec<ScopeWarning>) {
    let selectors: Vec<&str> = selector_list.split(',').map(str::trim).collect();
    let mut mapping = NameMapping::new();
    let result = rewrite(selector_list, &selectors, &mut mapping, &scoper, options);
    (result.selector, mapping, result.warnings)
}

#[test]
fn should_rewrite_every_token_of_a_complex_selector() {
    let (selector, mapping, warnings) = rewrite_list("div > .bro", &ScopeOptions::default());
    assert_eq!(selector, ".div_el_1 > .bro_1");
    assert!(warnings.is_empty());
    assert_mapping(&mapping, MappingCategory::Elements, &[("div", "div_el_1")]);
    assert_mapping(&mapping, MappingCategory::Classes, &[("bro", "bro_1")]);
}

#[test]
fn should_rewrite_each_selector_of_a_list() {
    let (selector, mapping, _) = rewrite_list("#foo, .bro", &ScopeOptions::default());
    assert_eq!(selector, "#foo_1, .bro_1");
    assert_mapping(&mapping, MappingCategory::Ids, &[("foo", "foo_1")]);
    assert_mapping(&mapping, MappingCategory::Classes, &[("bro", "bro_1")]);
}

#[test]
fn should_rewrite_repeated_names_in_order() {
    let (selector, mapping, _) = rewrite_list(".a .a", &ScopeOptions::default());
    assert_eq!(selector, ".a_1 .a_1");
    assert_mapping(&mapping, MappingCategory::Classes, &[("a", "a_1")]);
}

#[test]
fn should_not_match_elements_inside_scoped_names() {
    let (selector, _, _) = rewrite_list(".a a", &ScopeOptions::default());
    assert_eq!(selector, ".a_1 .a_el_1");

    let (selector, _, _) = rewrite_list("a.a", &ScopeOptions::default());
    assert_eq!(selector, ".a_el_1.a_1");
}

#[test]
fn should_not_match_prefixes_of_longer_names() {
    let (selector, mapping, _) = rewrite_list(".yoloYolo .yolo", &ScopeOptions::default());
    assert_eq!(selector, ".yoloYolo_1 .yolo_1");
    assert_mapping(
        &mapping,
        MappingCategory::Classes,
        &[("yoloYolo", "yoloYolo_1"), ("yolo", "yolo_1")],
    );
}

#[test]
fn should_rewrite_attribute_values_in_place() {
    let (selector, mapping, _) = rewrite_list(r#"td[class="cell"]"#, &ScopeOptions::default());
    assert_eq!(selector, r#".td_el_1[class~="cell_1"]"#);
    assert_mapping(&mapping, MappingCategory::Classes, &[("cell", "cell_1")]);
}

#[test]
fn should_join_whitespace_in_class_attribute_values() {
    let (selector, mapping, _) =
        rewrite_list(r#"td[class="cell center"]"#, &ScopeOptions::default());
    assert_eq!(selector, r#".td_el_1[class~="cell_center_1"]"#);
    assert_mapping(
        &mapping,
        MappingCategory::Classes,
        &[("cell center", "cell_center_1")],
    );
}

#[test]
fn should_record_id_attributes_as_ids() {
    let (selector, mapping, _) = rewrite_list("div[id=aapl]", &ScopeOptions::default());
    assert_eq!(selector, ".div_el_1[id=aapl_1]");
    assert_mapping(&mapping, MappingCategory::Ids, &[("aapl", "aapl_1")]);
    assert!(mapping.classes.is_empty());
}

#[test]
fn should_leave_disabled_categories_alone() {
    let options = ScopeOptions::default().with_ids(false).with_elements(false);
    let (selector, mapping, _) = rewrite_list("div #foo .bar", &options);
    assert_eq!(selector, "div #foo .bar_1");
    assert!(mapping.ids.is_empty());
    assert!(mapping.elements.is_empty());
}

#[test]
fn should_normalize_class_attributes_even_when_classes_are_disabled() {
    let options = ScopeOptions::default().with_classes(false);
    let (selector, mapping, _) = rewrite_list(r#"td[class="cell"]"#, &options);
    assert_eq!(selector, r#".td_el_1[class~="cell"]"#);
    assert!(mapping.classes.is_empty());
}

#[test]
fn should_apply_the_element_name_transform_before_the_marker() {
    let options = ScopeOptions::default().with_element_name_transform(|name| name.to_uppercase());
    let (selector, mapping, _) = rewrite_list("div", &options);
    assert_eq!(selector, ".DIV_el_1");
    assert_mapping(&mapping, MappingCategory::Elements, &[("div", "DIV_el_1")]);
}

#[test]
fn should_warn_about_unknown_tokens_and_keep_going() {
    let (selector, _, warnings) = rewrite_list("_foo .a", &ScopeOptions::default());
    assert_eq!(selector, "_foo .a_1");
    assert_eq!(
        warnings,
        vec![ScopeWarning::UnknownToken {
            token: "_foo".to_string(),
            selector: "_foo .a".to_string(),
        }]
    );
}
