pub mod saved_game;
