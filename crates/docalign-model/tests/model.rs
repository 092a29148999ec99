//! Tests for docalign-model types.

use docalign_model::{
    AlignOptions, DEFAULT_FUZZY_THRESHOLD, DuplicatePolicy, MatchPriority, ModelError,
    ScorerKind, Template, TemplateKey,
};

#[test]
fn template_parse_preserves_declaration_order() {
    let template = Template::parse("Invoice Number\nDate\nTotal Amount\n").unwrap();
    let keys: Vec<String> = template.iter().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["Invoice Number", "Date", "Total Amount"]);
}

#[test]
fn empty_source_gives_empty_template() {
    let template = Template::parse("\n   \n").unwrap();
    assert!(template.is_empty());
}

#[test]
fn template_new_rejects_duplicates() {
    let keys = vec![
        TemplateKey::new("Name").unwrap(),
        TemplateKey::new("name").unwrap(),
    ];
    assert!(matches!(
        Template::new(keys),
        Err(ModelError::DuplicateTemplateKey { line: 2, .. })
    ));
}

#[test]
fn template_key_deserialization_validates() {
    let key: TemplateKey = serde_json::from_str("\" Total \"").unwrap();
    assert_eq!(key.as_str(), "Total");
    assert!(serde_json::from_str::<TemplateKey>("\"  \"").is_err());
}

#[test]
fn template_deserialization_rejects_duplicates() {
    let template: Template = serde_json::from_str(r#"["Name", " Date "]"#).unwrap();
    assert_eq!(template, Template::parse("Name\nDate").unwrap());
    assert_eq!(serde_json::to_string(&template).unwrap(), r#"["Name","Date"]"#);

    let error = serde_json::from_str::<Template>(r#"["Name", "name"]"#).unwrap_err();
    assert!(error.to_string().contains("duplicate template key 'name'"), "{error}");
}

#[test]
fn default_options() {
    let options = AlignOptions::default();
    assert_eq!(options.duplicates, DuplicatePolicy::LastWins);
    assert_eq!(options.scorer, ScorerKind::TokenSort);
    assert_eq!(options.match_priority, MatchPriority::DeclarationOrder);
    assert_eq!(options.fuzzy_locate, Some(DEFAULT_FUZZY_THRESHOLD));
}

#[test]
fn strict_options_disable_fuzzy_locate() {
    assert_eq!(AlignOptions::strict().fuzzy_locate, None);
}

#[test]
fn fuzzy_threshold_is_clamped() {
    let options = AlignOptions::default().with_fuzzy_locate(Some(140.0));
    assert_eq!(options.fuzzy_locate, Some(100.0));
}
