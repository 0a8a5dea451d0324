use std::thread;

use localizer::formats::FormatType;
use localizer::{Localizer, LocalizerConfig, MemoryProvider, shared};

// One test owns the process-wide instance so nothing races on it.
#[test]
fn test_shared_instance_facade() {
    let provider = MemoryProvider::new()
        .with_catalog("strings", Some("en"), FormatType::Json, r#"{"hello": "Hello", "days": "Mon; Tue"}"#)
        .with_catalog("strings", Some("fr"), FormatType::Json, r#"{"hello": "Bonjour", "days": "lun; mar"}"#)
        .with_catalog("fonts", None, FormatType::Json, r#"{"body": "Georgia; 12"}"#)
        .with_image("badge")
        .with_image("badge_fr")
        .with_image("dot1")
        .with_image("dot2");
    let localizer = Localizer::load(LocalizerConfig::default(), provider).unwrap();
    shared::install(localizer);

    assert_eq!(shared::current_language().as_deref(), Some("en"));
    assert!(shared::is_english());
    assert!(shared::current_language_is_default());
    assert_eq!(shared::string_with_key("hello"), "Hello");
    assert_eq!(shared::image_named("badge").unwrap().name, "badge");

    shared::change_language("fr").unwrap();
    assert!(!shared::is_english());
    assert!(!shared::current_language_is_default());
    assert_eq!(shared::string_with_key("hello"), "Bonjour");
    assert!(shared::object_for_key_exists("days"));
    assert_eq!(shared::array_with_key("days"), vec!["lun", "mar"]);
    assert_eq!(shared::string_with_key_at_index("days", 0).unwrap(), "lun");
    assert_eq!(shared::font_with_key("body").unwrap().size, Some(12.0));
    assert_eq!(shared::image_with_name("badge").unwrap().name, "badge_fr");
    assert_eq!(
        shared::image_animation_array_with_image_named("dot", 2)
            .unwrap()
            .len(),
        2
    );

    assert!(shared::change_language("xx").is_err());
    assert_eq!(shared::current_language().as_deref(), Some("fr"));

    // Readers on other threads see one language or the other, never a mix.
    let readers = (0..4)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..100 {
                    let localizer = shared::read();
                    let expected = match localizer.current_language().map(|l| l.as_str()) {
                        Some("fr") => ("Bonjour", "lun"),
                        _ => ("Hello", "Mon"),
                    };
                    assert_eq!(localizer.string_with_key("hello"), expected.0);
                    assert_eq!(localizer.array_with_key("days")[0], expected.1);
                }
            })
        })
        .collect::<Vec<_>>();
    for code in ["en", "fr", "en", "fr"] {
        shared::change_language(code).unwrap();
    }
    for reader in readers {
        reader.join().unwrap();
    }

    assert!(shared::load_string_file("missing").is_err());
    assert_eq!(shared::string_with_key("hello"), "Bonjour");
}
