use std::sync::Arc;

use sonic_dna::{
    CachedGenerator, DigestAlgorithm, DnaConfig, ExtractOptions, FailureKind, PatternGenerator,
    PromptCache, SonicConfig, SonicDna, TemplateGenerator, commit, extract_dna,
    extract_dna_with_config, generate_blinding, verify_commitment, verify_recovery,
};

fn generated_dna(prompt: &str, salt: &str) -> (String, SonicDna) {
    let code = TemplateGenerator
        .generate(prompt)
        .expect("template generator answers")
        .code;
    let record =
        extract_dna(&code, &ExtractOptions::default().with_salt(salt)).expect("template extracts");
    (code, record)
}

#[test]
fn registration_and_recovery_hashes_match() {
    let registered = extract_dna(
        r#"s("bass").slow(2).distort(5).lpf(500)"#,
        &ExtractOptions::default().with_salt("x"),
    )
    .expect("registration");
    let recovered = extract_dna(
        r#"s("bass").lpf(500).slow(2).distort(5)"#,
        &ExtractOptions::default().with_salt("x"),
    )
    .expect("recovery");

    assert_eq!(registered.hash, recovered.hash);
    assert!(registered.same_vibe(&recovered));
}

#[test]
fn recovery_check_uses_the_registered_salt() {
    let cfg = DnaConfig::default();
    let registered =
        extract_dna(r#"s("bass").slow(2).distort(5).lpf(500)"#, &ExtractOptions::default())
            .expect("registration with fresh salt");

    assert!(
        verify_recovery(r#"s("bass").lpf(500).slow(2).distort(5)"#, &registered, &cfg)
            .expect("recovery runs")
    );
    assert!(
        !verify_recovery(r#"s("bass").lpf(500).slow(2).distort(6)"#, &registered, &cfg)
            .expect("recovery runs")
    );
}

#[test]
fn different_prompts_yield_different_vibes() {
    let (muffled_code, muffled) = generated_dna("a muffled bass line", "x");
    let (techno_code, techno) = generated_dna("fast techno at the warehouse", "x");

    assert_ne!(muffled_code, techno_code);
    assert_ne!(muffled.dna, techno.dna);
    assert_ne!(muffled.hash, techno.hash);
}

#[test]
fn prompt_generation_is_stable_through_the_cache() {
    let cache = Arc::new(PromptCache::default());
    let generator = CachedGenerator::new(TemplateGenerator, Arc::clone(&cache));

    let first = generator.generate("Muffled   BASS").expect("first");
    let second = generator.generate("muffled bass").expect("second");

    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
}

#[test]
fn hash_commitment_round_trip() {
    let record = extract_dna(r#"s("bass").lpf(500)"#, &ExtractOptions::default())
        .expect("extraction");
    let blinding = generate_blinding().expect("blinding");
    let sealed = commit(&record.hash, &blinding).expect("commit");

    assert!(verify_commitment(&sealed, &record.hash, &blinding).expect("verify"));

    let other = extract_dna(
        r#"s("bass").lpf(501)"#,
        &ExtractOptions::default().with_salt(record.salt.clone()),
    )
    .expect("other");
    assert!(!verify_commitment(&sealed, &other.hash, &blinding).expect("verify"));
}

#[test]
fn demo_path_is_labelled() {
    let record = extract_dna(r#"s("bd*4")"#, &ExtractOptions::default().with_salt("x").demo())
        .expect("demo digest");

    assert_eq!(record.algorithm, DigestAlgorithm::DemoFx);
    assert!(!record.algorithm.is_secure());
    assert_eq!(record.hash.len(), 64);

    let secure = extract_dna(r#"s("bd*4")"#, &ExtractOptions::default().with_salt("x"))
        .expect("sha256 digest");
    assert_eq!(secure.dna, record.dna);
    assert_ne!(secure.hash, record.hash);
    assert!(!secure.same_vibe(&record));

    let err = verify_recovery(r#"s("bd*4")"#, &record, &DnaConfig::default()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::DigestUnavailable);
}

#[test]
fn yaml_config_drives_extraction() {
    let config = SonicConfig::from_yaml(
        r#"
version: "1.0"
dna:
  denylist: ["evaluate", "id", "gain"]
"#,
    )
    .expect("config loads");

    let record = extract_dna_with_config(
        r#"s("bd").gain(0.8)"#,
        &config.dna,
        &ExtractOptions::default().with_salt("x"),
    )
    .expect("extraction");
    assert_eq!(record.dna, "s(bd)");
}

#[test]
fn record_serializes_for_callers() {
    let record = extract_dna(r#"note("c2 eb2").s("sawtooth")"#, &ExtractOptions::default().with_salt("x"))
        .expect("extraction");
    let json = serde_json::to_value(&record).expect("serializes");

    assert_eq!(json["dna"], "note(c2 eb2)|s(sawtooth)");
    assert_eq!(json["salt"], "x");
    assert_eq!(json["algorithm"], "sha256");
    assert_eq!(json["version"], 1);

    let back: SonicDna = serde_json::from_value(json).expect("deserializes");
    assert_eq!(back, record);
}
