use std::path::Path;

use localizer::{Domain, Localizer, formats::write_catalog_to_file};
use serde_json::json;

pub fn print_info(localizer: &Localizer, json_output: bool) -> Result<(), String> {
    let config = localizer.config();
    let language = localizer.current_language().map(|l| l.to_string());
    let strings = localizer.catalog(Domain::Strings).map_or(0, |c| c.len());
    let fonts = localizer.catalog(Domain::Fonts).map_or(0, |c| c.len());
    let available = config
        .available_languages
        .as_ref()
        .map(|set| set.iter().map(|l| l.to_string()).collect::<Vec<_>>());

    if json_output {
        let body = json!({
            "language": language,
            "default_language": config.default_language.to_string(),
            "is_default": localizer.current_language_is_default(),
            "is_english": localizer.is_english(),
            "available_languages": available,
            "strings_file": config.strings_file,
            "fonts_file": config.fonts_file,
            "entries": {
                "strings": strings,
                "fonts": fonts,
            },
        });
        let json = serde_json::to_string_pretty(&body)
            .map_err(|e| format!("Error serializing to JSON: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    println!("=== Localizer ===");
    println!("Language: {}", language.as_deref().unwrap_or("(none)"));
    println!("Default language: {}", config.default_language);
    println!("Is default: {}", localizer.current_language_is_default());
    println!("Is English: {}", localizer.is_english());
    if let Some(available) = available {
        println!("Available: {}", available.join(", "));
    }
    println!("Strings ({}): {} entries", config.strings_file, strings);
    match &config.fonts_file {
        Some(file) => println!("Fonts ({}): {} entries", file, fonts),
        None => println!("Fonts: not registered"),
    }
    Ok(())
}

pub fn export_catalog(localizer: &Localizer, domain: Domain, output: &Path) -> Result<(), String> {
    let catalog = localizer
        .catalog(domain)
        .ok_or_else(|| "No catalog is loaded".to_string())?;
    write_catalog_to_file(catalog, output)
        .map_err(|e| format!("Error writing to {}: {}", output.display(), e))?;
    println!(
        "Exported {} {} entries to {}",
        catalog.len(),
        domain,
        output.display()
    );
    Ok(())
}
