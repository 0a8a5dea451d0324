use localizer::{ImageHandle, Localizer};

pub fn print_string(localizer: &Localizer, key: &str, index: Option<usize>) -> Result<(), String> {
    let value = match index {
        Some(index) => localizer
            .string_with_key_at_index(key, index)
            .map_err(|e| e.to_string())?,
        None => localizer.string_with_key(key),
    };
    println!("{}", value);
    Ok(())
}

pub fn print_array(localizer: &Localizer, key: &str, json_output: bool) -> Result<(), String> {
    let items = localizer.array_with_key(key);
    if json_output {
        let json = serde_json::to_string_pretty(&items)
            .map_err(|e| format!("Error serializing to JSON: {}", e))?;
        println!("{}", json);
        return Ok(());
    }
    for item in items {
        println!("{}", item);
    }
    Ok(())
}

pub fn print_font(localizer: &Localizer, key: &str) -> Result<(), String> {
    let font = localizer.font_with_key(key).map_err(|e| e.to_string())?;
    println!("Name: {}", font.name);
    if let Some(size) = font.size {
        println!("Size: {}", size);
    }
    if let Some(path) = &font.path {
        println!("Path: {}", path.display());
    }
    Ok(())
}

fn print_handle(image: &ImageHandle) {
    match &image.path {
        Some(path) => println!("{}\t{}", image.name, path.display()),
        None => println!("{}", image.name),
    }
}

pub fn print_image(localizer: &Localizer, name: &str, frames: Option<usize>) -> Result<(), String> {
    match frames {
        Some(count) => {
            let images = localizer
                .image_animation_array_with_image_named(name, count)
                .map_err(|e| e.to_string())?;
            images.iter().for_each(print_handle);
        }
        None => {
            let image = localizer
                .image_named(name)
                .ok_or_else(|| format!("No image matches `{}`", name))?;
            print_handle(&image);
        }
    }
    Ok(())
}
