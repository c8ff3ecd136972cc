//! Static service catalog. Selecting an option seeds the booking wizard.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Service {
    pub name: &'static str,
    pub options: &'static [&'static str],
}

pub const HAIR_DYE: &str = "Hair Dye";

pub const SERVICES: &[Service] = &[
    Service {
        name: "Haircut",
        options: &["Buzz Cut", "Quiff", "CR7", "Shag"],
    },
    Service {
        name: "Beard Trim",
        options: &["Option A", "Option B", "Option C", "Option D"],
    },
    Service {
        name: "Hair Treatment",
        options: &["Basic", "Advanced", "Premium", "Luxury"],
    },
    Service {
        name: HAIR_DYE,
        options: &["Blonde", "Brunette", "Red", "Black"],
    },
];

pub fn service_names() -> Vec<&'static str> {
    SERVICES.iter().map(|s| s.name).collect()
}

pub fn find_service(name: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.name == name)
}

/// Looks up a leaf option, returning the canonical service and option names.
pub fn find_option(service: &str, option: &str) -> Option<(&'static str, &'static str)> {
    let service = find_service(service)?;
    let option = service.options.iter().find(|o| **o == option)?;
    Some((service.name, option))
}

pub fn hair_dye_info(color: &str) -> &'static str {
    match color {
        "Blonde" => "This is a light blonde hair dye. Perfect for a natural sun-kissed look.",
        "Brunette" => "This is a rich brunette hair dye. Ideal for adding depth and shine.",
        "Red" => "This is a vibrant red hair dye. Adds boldness and warmth to your style.",
        "Black" => "This is a deep black hair dye. Creates a sleek and sophisticated look.",
        _ => "Product information not available.",
    }
}

pub fn reservation_prompt(service: &str, option: &str) -> String {
    format!("Do you want to book the service '{service}' with specifications '{option}'?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_services_with_four_options_each() {
        assert_eq!(
            service_names(),
            vec!["Haircut", "Beard Trim", "Hair Treatment", "Hair Dye"]
        );
        assert!(SERVICES.iter().all(|s| s.options.len() == 4));
    }

    #[test]
    fn option_lookup_is_exact() {
        assert_eq!(find_option("Haircut", "CR7"), Some(("Haircut", "CR7")));
        assert_eq!(find_option("Haircut", "Blonde"), None);
        assert_eq!(find_option("haircut", "CR7"), None);
    }

    #[test]
    fn unknown_dye_has_fallback_text() {
        assert!(hair_dye_info("Red").contains("vibrant red"));
        assert_eq!(hair_dye_info("Green"), "Product information not available.");
    }

    #[test]
    fn prompt_names_service_and_option() {
        assert_eq!(
            reservation_prompt("Hair Dye", "Black"),
            "Do you want to book the service 'Hair Dye' with specifications 'Black'?"
        );
    }
}
