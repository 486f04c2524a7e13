pub const JSON: &str = "application/json";
