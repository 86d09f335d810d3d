use crate::*;
use std::collections::HashSet;

// ========== Tier schemes ==========

#[test]
fn test_upper_suffixes() {
    let scheme = TierScheme::Upper;
    assert_eq!(scheme.natural_capacity(), 26);
    assert_eq!(scheme.suffix(0).as_deref(), Some("A"));
    assert_eq!(scheme.suffix(25).as_deref(), Some("Z"));
    assert_eq!(scheme.suffix(26), None);
    assert_eq!(scheme.code_len(), 2);
}

#[test]
fn test_lower_pair_suffixes() {
    let scheme = TierScheme::LowerPair;
    assert_eq!(scheme.natural_capacity(), 676);
    assert_eq!(scheme.suffix(0).as_deref(), Some("aa"));
    assert_eq!(scheme.suffix(27).as_deref(), Some("bb"));
    assert_eq!(scheme.suffix(675).as_deref(), Some("zz"));
    let all: HashSet<String> = scheme.suffixes().collect();
    assert_eq!(all.len(), 676);
}

#[test]
fn test_numeric_suffixes_are_padded() {
    let scheme = TierScheme::Numeric { width: 3 };
    assert_eq!(scheme.natural_capacity(), 1000);
    assert_eq!(scheme.suffix(7).as_deref(), Some("007"));
    assert_eq!(scheme.suffix(999).as_deref(), Some("999"));
    assert_eq!(scheme.code_len(), 4);
}

#[test]
fn test_schemes_have_disjoint_leading_chars() {
    let schemes = [TierScheme::Upper, TierScheme::LowerPair, TierScheme::Numeric { width: 2 }];
    for c in ['A', 'q', '7'] {
        let owners = schemes.iter().filter(|s| s.starts_with(c)).count();
        assert_eq!(owners, 1, "char {c}");
    }
}

#[test]
fn test_tier_spec_serde() {
    let spec = TierSpec::new(TierScheme::Numeric { width: 3 }).with_capacity(100);
    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.contains("\"numeric\""));
    let back: TierSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
}

// ========== Reserved set ==========

#[test]
fn test_reserved_words_case_insensitive() {
    let reserved = CodecConfig::default().reserved_set();
    assert!(reserved.is_reserved_pattern("This"));
    assert!(reserved.is_reserved_pattern("where"));
    assert!(!reserved.is_reserved_pattern("framework"));
}

#[test]
fn test_reserved_codes() {
    let reserved = CodecConfig::default().reserved_set();
    assert!(reserved.is_reserved_code("$md"));
    assert!(reserved.is_reserved_code("€py"));
    assert!(!reserved.is_reserved_code("$ab"));
    assert!(!reserved.is_reserved_code("$A"));
}

#[test]
fn test_reserved_set_normalizes_case() {
    let reserved = ReservedSet::new(["The", "WHERE", "the"], ["MD", "py"]);
    assert_eq!(reserved.words().collect::<Vec<_>>(), vec!["the", "where"]);
    assert_eq!(reserved.code_suffixes().collect::<Vec<_>>(), vec!["md", "py"]);
    assert!(reserved.is_reserved_code("$Md"));
}

// ========== Config ==========

#[test]
fn test_default_config_is_valid() {
    CodecConfig::default().validate().unwrap();
    CodecConfig::aggressive().validate().unwrap();
}

#[test]
fn test_aggressive_lowers_word_threshold() {
    let config = CodecConfig::aggressive();
    assert_eq!(config.word.min_occurrences, 2);
    assert_eq!(CodecConfig::default().word.min_occurrences, 3);
}

#[test]
fn test_duplicate_sigil_rejected() {
    let mut config = CodecConfig::default();
    config.phrase.sigil = '$';
    let err = config.validate().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_alphanumeric_sigil_rejected() {
    let mut config = CodecConfig::default();
    config.template.sigil = 'T';
    assert!(config.validate().is_err());
}

#[test]
fn test_repeated_scheme_rejected() {
    let mut config = CodecConfig::default();
    config.word.tiers = vec![
        TierSpec::new(TierScheme::Numeric { width: 2 }),
        TierSpec::new(TierScheme::Numeric { width: 3 }),
    ];
    assert!(config.validate().is_err());
}

#[test]
fn test_empty_ladder_rejected() {
    let mut config = CodecConfig::default();
    config.phrase.tiers.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_bad_template_shape_rejected() {
    let mut config = CodecConfig::default();
    config.analyzer.template_shapes.push("(unclosed".into());
    assert!(matches!(config.validate(), Err(GlossaError::InvalidRegex(_))));
}

#[test]
fn test_bad_phrase_window_rejected() {
    let mut config = CodecConfig::default();
    config.analyzer.min_phrase_words = 1;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_from_partial_json() {
    let config = CodecConfig::from_json_str(r#"{"case_mode":"fold","token_join":false}"#).unwrap();
    assert_eq!(config.case_mode, CaseMode::Fold);
    assert!(!config.token_join);
    assert_eq!(config.word.sigil, '$');
}

#[test]
fn test_config_json_roundtrip() {
    let config = CodecConfig::aggressive();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let back = CodecConfig::from_json_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    let err = CodecConfig::from_json_str(r#"{"analyzer":{"min_word_length":0}}"#).unwrap_err();
    assert!(matches!(err, GlossaError::Configuration(_)));
}

#[test]
fn test_cheapest_code_len() {
    assert_eq!(ClassConfig::word().cheapest_code_len(), 2);
}

// ========== Strategy / class ==========

#[test]
fn test_strategy_class_mapping() {
    for class in PatternClass::ALL {
        assert_eq!(Strategy::from(class).class(), Some(class));
    }
    assert_eq!(Strategy::TokenJoin.class(), None);
}

#[test]
fn test_only_word_bounded_classes_join() {
    assert!(!PatternClass::Template.is_joinable());
    assert!(PatternClass::Phrase.is_joinable());
    assert!(PatternClass::Word.is_joinable());
}
