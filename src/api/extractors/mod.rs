pub mod public_id;
