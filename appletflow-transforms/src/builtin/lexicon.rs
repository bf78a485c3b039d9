//! AFINN-style valence lexicon (word -> integer in [-5, 5])

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static ENTRIES: &[(&str, i32)] = &[
    ("abandon", -2),
    ("abandoned", -2),
    ("abuse", -3),
    ("abused", -3),
    ("accept", 1),
    ("accepted", 1),
    ("accident", -2),
    ("accomplished", 2),
    ("ache", -2),
    ("admire", 3),
    ("adorable", 3),
    ("adore", 3),
    ("advantage", 2),
    ("afraid", -2),
    ("aggressive", -2),
    ("agony", -3),
    ("agree", 1),
    ("alarm", -2),
    ("alarmed", -2),
    ("alone", -2),
    ("amazed", 2),
    ("amazing", 4),
    ("anger", -3),
    ("angry", -3),
    ("annoy", -2),
    ("annoyed", -2),
    ("annoying", -2),
    ("anxious", -2),
    ("apologize", -1),
    ("appalling", -2),
    ("appreciate", 2),
    ("appreciated", 2),
    ("approval", 2),
    ("ashamed", -2),
    ("attractive", 2),
    ("awesome", 4),
    ("awful", -3),
    ("awkward", -2),
    ("bad", -3),
    ("badly", -3),
    ("bankrupt", -3),
    ("beautiful", 3),
    ("benefit", 2),
    ("best", 3),
    ("betrayed", -3),
    ("better", 2),
    ("bitter", -2),
    ("blame", -2),
    ("bless", 2),
    ("blessed", 3),
    ("bliss", 3),
    ("bored", -2),
    ("boring", -3),
    ("brave", 2),
    ("breakthrough", 3),
    ("breathtaking", 5),
    ("bright", 1),
    ("brilliant", 4),
    ("broke", -1),
    ("broken", -1),
    ("bug", -2),
    ("buggy", -2),
    ("calm", 2),
    ("care", 2),
    ("careful", 2),
    ("careless", -2),
    ("catastrophe", -3),
    ("catastrophic", -4),
    ("celebrate", 3),
    ("chaos", -2),
    ("charming", 3),
    ("cheap", -3),
    ("cheat", -3),
    ("cheer", 2),
    ("cheerful", 2),
    ("clean", 2),
    ("clear", 1),
    ("clever", 2),
    ("collapse", -2),
    ("comfortable", 2),
    ("complain", -2),
    ("confident", 2),
    ("confused", -2),
    ("congrats", 2),
    ("cool", 1),
    ("corrupt", -3),
    ("crap", -3),
    ("crash", -2),
    ("crazy", -2),
    ("crisis", -3),
    ("cruel", -3),
    ("cry", -1),
    ("cute", 2),
    ("damage", -3),
    ("damn", -4),
    ("danger", -2),
    ("dangerous", -2),
    ("dead", -3),
    ("delay", -1),
    ("delayed", -1),
    ("delight", 3),
    ("delighted", 3),
    ("depressed", -2),
    ("desperate", -3),
    ("destroy", -3),
    ("destroyed", -3),
    ("disappoint", -2),
    ("disappointed", -2),
    ("disappointing", -2),
    ("disaster", -2),
    ("disgusting", -3),
    ("dislike", -2),
    ("dread", -2),
    ("dumb", -3),
    ("eager", 2),
    ("easy", 1),
    ("effective", 2),
    ("efficient", 2),
    ("elegant", 2),
    ("embarrassed", -2),
    ("encourage", 2),
    ("energetic", 2),
    ("enjoy", 2),
    ("enjoyed", 2),
    ("enthusiastic", 3),
    ("error", -2),
    ("excellent", 3),
    ("excited", 3),
    ("exciting", 3),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("fair", 2),
    ("fake", -3),
    ("fantastic", 4),
    ("fascinating", 3),
    ("fast", 1),
    ("fear", -2),
    ("fine", 2),
    ("flawless", 2),
    ("fool", -2),
    ("fraud", -4),
    ("free", 1),
    ("friendly", 2),
    ("frustrated", -2),
    ("frustrating", -2),
    ("fun", 4),
    ("funny", 4),
    ("furious", -3),
    ("gain", 2),
    ("generous", 2),
    ("glad", 3),
    ("gloomy", -2),
    ("good", 3),
    ("gorgeous", 3),
    ("grateful", 3),
    ("great", 3),
    ("greed", -3),
    ("grief", -2),
    ("happy", 3),
    ("harm", -2),
    ("hate", -3),
    ("hated", -3),
    ("hateful", -3),
    ("healthy", 2),
    ("heartbreaking", -3),
    ("helpful", 2),
    ("hero", 2),
    ("hopeful", 2),
    ("hopeless", -2),
    ("horrible", -3),
    ("hurt", -2),
    ("ideal", 2),
    ("idiot", -3),
    ("ignore", -1),
    ("ill", -2),
    ("impressive", 3),
    ("improve", 2),
    ("improved", 2),
    ("incredible", 4),
    ("inspiring", 3),
    ("interesting", 2),
    ("joy", 3),
    ("joyful", 3),
    ("kind", 2),
    ("lame", -2),
    ("laugh", 1),
    ("lazy", -1),
    ("liar", -3),
    ("like", 2),
    ("liked", 2),
    ("lose", -3),
    ("loss", -3),
    ("lost", -3),
    ("love", 3),
    ("loved", 3),
    ("lovely", 3),
    ("loving", 2),
    ("lucky", 3),
    ("mad", -3),
    ("magnificent", 3),
    ("mess", -2),
    ("miserable", -3),
    ("miss", -2),
    ("mistake", -2),
    ("nasty", -3),
    ("nervous", -2),
    ("nice", 3),
    ("noisy", -1),
    ("outstanding", 5),
    ("pain", -2),
    ("painful", -2),
    ("panic", -3),
    ("pathetic", -2),
    ("peaceful", 2),
    ("perfect", 3),
    ("pleasant", 3),
    ("pleased", 3),
    ("poor", -2),
    ("popular", 3),
    ("positive", 2),
    ("powerful", 2),
    ("praise", 3),
    ("pretty", 1),
    ("problem", -2),
    ("profit", 2),
    ("proud", 2),
    ("rage", -2),
    ("recommend", 2),
    ("regret", -2),
    ("reject", -1),
    ("rejected", -1),
    ("relaxed", 2),
    ("reliable", 2),
    ("relief", 1),
    ("remarkable", 2),
    ("rich", 2),
    ("ridiculous", -3),
    ("risk", -2),
    ("rude", -2),
    ("ruin", -2),
    ("ruined", -2),
    ("sad", -2),
    ("safe", 1),
    ("satisfied", 2),
    ("scam", -2),
    ("scared", -2),
    ("secure", 2),
    ("shame", -2),
    ("shock", -2),
    ("sick", -2),
    ("silly", -1),
    ("slow", -2),
    ("smart", 1),
    ("smile", 2),
    ("solid", 2),
    ("sorry", -1),
    ("splendid", 3),
    ("stable", 2),
    ("steal", -2),
    ("stolen", -2),
    ("strong", 2),
    ("stupid", -2),
    ("success", 2),
    ("successful", 3),
    ("suck", -3),
    ("sucks", -3),
    ("super", 3),
    ("superb", 5),
    ("support", 2),
    ("sweet", 2),
    ("terrible", -3),
    ("terrific", 4),
    ("thank", 2),
    ("thanks", 2),
    ("thrilled", 5),
    ("tired", -2),
    ("tragedy", -2),
    ("trouble", -2),
    ("trust", 1),
    ("ugly", -3),
    ("unhappy", -2),
    ("upset", -2),
    ("useful", 2),
    ("useless", -2),
    ("valuable", 2),
    ("victory", 3),
    ("violence", -3),
    ("warm", 1),
    ("waste", -1),
    ("weak", -2),
    ("win", 4),
    ("winner", 4),
    ("wonderful", 4),
    ("worried", -3),
    ("worse", -3),
    ("worst", -3),
    ("worth", 2),
    ("worthless", -2),
    ("wow", 4),
    ("wrong", -2),
    ("yay", 2),
];

static NEGATORS: &[&str] = &[
    "cant", "can't", "dont", "don't", "doesnt", "doesn't", "isnt", "isn't", "wont", "won't",
    "not", "non", "no", "never",
];

static LEXICON: LazyLock<HashMap<&'static str, i32>> =
    LazyLock::new(|| ENTRIES.iter().copied().collect());

static NEGATOR_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATORS.iter().copied().collect());

/// Valence of a lowercase token, if it is in the lexicon
pub(crate) fn valence(token: &str) -> Option<i32> {
    LEXICON.get(token).copied()
}

pub(crate) fn is_negator(token: &str) -> bool {
    NEGATOR_SET.contains(token)
}
