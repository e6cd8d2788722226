// Déclaration des commandes disponibles dans le CLI

pub mod domain;
pub mod run;
