pub mod sound_level;
