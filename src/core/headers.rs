pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
