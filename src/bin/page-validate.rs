use std::env;
use std::fs;
use std::process;

use storefront_render::{parse_page, validate_page, validate_theme, RenderError, Theme};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: page-validate [--theme <theme.json>] <page.json>...");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  page-validate landing.json");
        eprintln!("  page-validate --theme theme.json *.json");
        process::exit(1);
    }

    let mut exit_code = 0;
    let mut files: Vec<String> = Vec::new();
    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        if arg == "--theme" {
            match iter.next() {
                Some(path) => match validate_theme_file(path) {
                    Ok(()) => println!("✓ {} is valid", path),
                    Err(errors) => {
                        eprintln!("✗ {} has errors:", path);
                        for e in &errors {
                            print_error(e);
                        }
                        exit_code = 1;
                    }
                },
                None => {
                    eprintln!("--theme requires a file path");
                    process::exit(1);
                }
            }
        } else {
            files.push(arg.clone());
        }
    }

    for file_path in files {
        match validate_page_file(&file_path) {
            Ok(()) => {
                println!("✓ {} is valid", file_path);
            }
            Err(errors) => {
                eprintln!("✗ {} has errors:", file_path);
                for e in &errors {
                    print_error(e);
                }
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn validate_page_file(path: &str) -> Result<(), Vec<RenderError>> {
    let content = fs::read_to_string(path)
        .map_err(|e| vec![RenderError::Validation(format!("Failed to read file: {}", e))])?;
    let page = parse_page(&content).map_err(|e| vec![e])?;
    let errors = validate_page(&page);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_theme_file(path: &str) -> Result<(), Vec<RenderError>> {
    let content = fs::read_to_string(path)
        .map_err(|e| vec![RenderError::Validation(format!("Failed to read file: {}", e))])?;
    let theme: Theme =
        serde_json::from_str(&content).map_err(|e| vec![RenderError::from(e)])?;
    let errors = validate_theme(&theme);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn print_error(error: &RenderError) {
    match error {
        RenderError::Json(msg) => {
            eprintln!("  JSON error:");
            eprintln!("    {}", msg);
        }
        RenderError::Validation(msg) => {
            eprintln!("  Validation error:");
            eprintln!("    {}", msg);
        }
        RenderError::InvalidComponent { component, reason } => {
            eprintln!("  Invalid component '{}':", component);
            eprintln!("    {}", reason);
        }
        RenderError::InvalidProperty {
            component,
            property,
            reason,
        } => {
            eprintln!(
                "  Invalid property '{}' for component '{}':",
                property, component
            );
            eprintln!("    {}", reason);
        }
        RenderError::InvalidStyle { property, reason } => {
            eprintln!("  Invalid style property '{}':", property);
            eprintln!("    {}", reason);
        }
        RenderError::InvalidColor { value, reason } => {
            eprintln!("  Invalid color value '{}':", value);
            eprintln!("    {}", reason);
        }
        RenderError::InvalidThemeReference { reference, reason } => {
            eprintln!("  Invalid theme reference '{}':", reference);
            eprintln!("    {}", reason);
        }
        RenderError::MissingProperty {
            component,
            property,
        } => {
            eprintln!(
                "  Missing required property '{}' for component '{}'",
                property, component
            );
        }
        RenderError::ValueOutOfRange {
            property,
            value,
            range,
        } => {
            eprintln!("  Value out of range for '{}':", property);
            eprintln!("    Value: {}", value);
            eprintln!("    Expected range: {}", range);
        }
        RenderError::DuplicateId { id } => {
            eprintln!("  Duplicate id '{}'", id);
            eprintln!("    Component ids must be unique within the page");
        }
        RenderError::MaxNestingDepthExceeded { max_depth } => {
            eprintln!("  Maximum nesting depth ({}) exceeded", max_depth);
            eprintln!("    Components are nested too deeply");
        }
        RenderError::EmptyPage => {
            eprintln!("  Empty page: document contains no component nodes");
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
