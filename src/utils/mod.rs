pub mod html;
pub mod jwt;
pub mod status_id;

#[cfg(test)]
pub mod test_app_state;
