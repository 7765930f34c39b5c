//! Options and Configuration Tests

mod utils;

use std::sync::Arc;

use scopeify::options::{stage_by_name, DEFAULT_ASTERISK_NAME};
use scopeify::{
    scopeify, AsteriskName, ScopeConfig, ScopeError, ScopeOptions, Scopeify, Stage, StripComments,
};
use utils::{options, scope_with, suffix_one};

struct Uppercase;

impl Stage for Uppercase {
    fn name(&self) -> &str {
        "uppercase"
    }

    fn process(&self, css: &str) -> String {
        css.to_uppercase()
    }
}

#[test]
fn should_enable_everything_by_default() {
    let options = ScopeOptions::default();
    assert!(options.classes);
    assert!(options.ids);
    assert!(options.elements);
    assert!(options.keyframes);
    assert!(options.font_faces);
    assert_eq!(options.asterisk_name.resolve(), DEFAULT_ASTERISK_NAME);
    assert!(options.stages.is_empty());
    assert_eq!((options.element_name_transform)("div"), "div");
}

#[test]
fn should_resolve_generated_asterisk_names_on_every_call() {
    let counter = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let calls = counter.clone();
    let name = AsteriskName::Generated(Arc::new(move || {
        let n = calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        format!("star{}", n)
    }));
    assert_eq!(name.resolve(), "star0");
    assert_eq!(name.resolve(), "star1");
}

mod config {
    use super::*;

    #[test]
    fn should_overlay_only_present_keys() {
        let config = ScopeConfig::from_json(r#"{ "elements": false, "asteriskName": "__all" }"#)
            .unwrap();
        let options = config.into_options().unwrap();
        assert!(!options.elements);
        assert!(options.classes);
        assert!(options.font_faces);
        assert_eq!(options.asterisk_name.resolve(), "__all");
    }

    #[test]
    fn should_read_camel_case_keys() {
        let config = ScopeConfig::from_json(r#"{ "fontFaces": false, "keyframes": false }"#).unwrap();
        let options = config
            .apply_to(ScopeOptions::default().with_classes(false))
            .unwrap();
        assert!(!options.font_faces);
        assert!(!options.keyframes);
        assert!(!options.classes);
    }

    #[test]
    fn should_resolve_known_stages() {
        let config = ScopeConfig::from_json(r#"{ "plugins": ["strip-comments"] }"#).unwrap();
        let options = config.into_options().unwrap();
        let names: Vec<&str> = options.stages.iter().map(|stage| stage.name()).collect();
        assert_eq!(names, vec!["strip-comments"]);
    }

    #[test]
    fn should_reject_plugins_that_are_not_an_array() {
        let config = ScopeConfig::from_json(r#"{ "plugins": "strip-comments" }"#).unwrap();
        let err = config.into_options().unwrap_err();
        assert!(matches!(err, ScopeError::MalformedOptions { .. }));
        assert!(err.to_string().contains("must be an array"));
    }

    #[test]
    fn should_reject_plugin_entries_that_are_not_names() {
        let config = ScopeConfig::from_json(r#"{ "plugins": [42] }"#).unwrap();
        assert!(matches!(
            config.into_options(),
            Err(ScopeError::MalformedOptions { found }) if found == "42"
        ));
    }

    #[test]
    fn should_reject_unknown_stages() {
        let config = ScopeConfig::from_json(r#"{ "plugins": ["autoprefixer"] }"#).unwrap();
        assert!(matches!(
            config.into_options(),
            Err(ScopeError::UnknownStage(name)) if name == "autoprefixer"
        ));
    }

    #[test]
    fn should_report_invalid_json() {
        assert!(matches!(
            ScopeConfig::from_json(r#"{ "classes": "yes" }"#),
            Err(ScopeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn should_build_a_reusable_pass_from_config() {
        let config = ScopeConfig::from_json(r#"{ "ids": false }"#).unwrap();
        let pass = Scopeify::from_config(config).unwrap();
        assert!(!pass.options().ids);
        let result = pass.process("#a { color: red; }");
        assert_eq!(result.css, "#a { color: red; }");
    }
}

mod stages {
    use super::*;

    #[test]
    fn should_look_up_built_in_stages() {
        assert!(stage_by_name("strip-comments").is_some());
        assert!(stage_by_name("autoprefixer").is_none());
    }

    #[test]
    fn should_strip_comments() {
        assert_eq!(StripComments.process("/* a */.b { } /* c */"), ".b { } ");
    }

    #[test]
    fn should_run_stages_in_order_before_scoping() {
        let options = ScopeOptions::default()
            .with_stage(Arc::new(StripComments))
            .with_stage(Arc::new(Uppercase));
        let result = scope_with("/* note */.a { color: red; }", options);
        assert_eq!(result.css, ".A_1 { COLOR: RED; }");
    }

    #[test]
    fn should_derive_the_suffix_from_the_unstaged_text() {
        let css = "/* note */ .a { color: red; }";
        let plain = scopeify(css, &ScopeOptions::default());
        let staged = scopeify(
            css,
            &ScopeOptions::default().with_stage(Arc::new(StripComments)),
        );
        assert_eq!(plain.mapping.classes["a"], staged.mapping.classes["a"]);
    }
}

#[test]
fn should_produce_identical_output_for_identical_input() {
    let css = "@media print { .a > b#c { animation: x 1s; } } @keyframes x { to { top: 0; } }";
    let first = scopeify(css, &ScopeOptions::default());
    let second = scopeify(css, &ScopeOptions::default());
    assert_eq!(first, second);
}

#[test]
fn should_accept_a_custom_scoper_factory() {
    let options = options().with_scoper_factory(|source: &str| {
        let length = source.len();
        Box::new(move |name: &str| format!("{}-{}", name, length))
    });
    let result = scopeify(".a {}", &options);
    assert_eq!(result.css, ".a-5 {}");

    let result = scopeify(".a {}", &ScopeOptions::default().with_scoper_factory(suffix_one));
    assert_eq!(result.css, ".a_1 {}");
}
