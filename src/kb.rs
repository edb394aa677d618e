use crate::rules::{KnowledgeBase, Rule};

/// Moves scoring below this are considered weak.
pub const LOW_SCORE_THRESHOLD: f32 = 30.0;

pub const DERIVE_BEST_MOVE: &str = "derive-best-move";

impl KnowledgeBase {
    /// The shipped catalogue, in evaluation order.
    pub fn standard() -> Self {
        Self {
            rules: standard_rules(),
        }
    }
}

pub fn standard_rules() -> Vec<Rule> {
    // Best-move derivation must precede every rule that reads the best move.
    let mut rules = Vec::with_capacity(18);
    rules.extend(hp_and_type_rules());
    rules.extend(move_rules());
    rules.extend(tempo_rules());
    rules.extend(matchup_commentary_rules());
    rules
}

fn hp_and_type_rules() -> [Rule; 5] {
    [
        Rule::new(
            "attack-with-type-advantage",
            |f| f.inputs().my_hp_pct >= 60.0 && f.inputs().my_advantage,
            |f| f.recommend("You have high HP and a type advantage: attacking is a good option.", 80),
            "With high HP and a type advantage, playing offensively is reasonable.",
        ),
        Rule::new(
            "switch-low-hp-enemy-advantage",
            |f| f.inputs().my_hp_pct <= 35.0 && f.inputs().enemy_advantage,
            |f| {
                f.recommend(
                    "You are at a type disadvantage and low on HP: switching out is recommended.",
                    95,
                )
            },
            "At a clear disadvantage with little HP left, pivoting to another Pokemon is the expert play.",
        ),
        Rule::new(
            "finish-low-hp-enemy",
            |f| f.inputs().enemy_hp_pct <= 25.0 && f.inputs().my_advantage,
            |f| {
                f.recommend(
                    "The opponent is badly hurt and you have the advantage: go for the knockout this turn.",
                    90,
                )
            },
            "With the opponent at low HP and a type advantage, going for the KO pays off.",
        ),
        Rule::new(
            "neutral-play-no-advantage",
            |f| {
                let i = f.inputs();
                i.my_hp_pct >= 50.0 && i.enemy_hp_pct >= 50.0 && !i.my_advantage && !i.enemy_advantage
            },
            |f| {
                f.recommend(
                    "Neither side has a clear type advantage: pick a safe move or scout what the opponent does.",
                    50,
                )
            },
            "Neutral matchups call for safe play.",
        ),
        Rule::new(
            "risky-play-both-low",
            |f| f.inputs().my_hp_pct <= 30.0 && f.inputs().enemy_hp_pct <= 30.0,
            |f| f.recommend("Both Pokemon are very low on HP: any turn can decide the battle.", 70),
            "With both Pokemon at critical HP, every decision carries a lot of weight.",
        ),
    ]
}

fn move_rules() -> [Rule; 4] {
    [
        Rule::new(
            DERIVE_BEST_MOVE,
            |f| f.best_move().is_none() && !f.inputs().my_moves.is_empty(),
            |f| {
                if let Some(best) = f.top_scoring_move().cloned() {
                    f.set_best_move(best);
                }
            },
            "The best available move is computed from effectiveness, power and STAB.",
        ),
        Rule::new(
            "use-super-effective",
            |f| f.best_effectiveness().is_some_and(|eff| eff >= 2.0),
            |f| {
                let text = match f.best_move() {
                    Some(best) => format!(
                        "Your best offensive option is {} (effectiveness x{}).",
                        best.name, best.effectiveness
                    ),
                    None => return,
                };
                f.recommend(text, 92)
            },
            "When a super-effective move exists, that attack takes priority.",
        ),
        Rule::new(
            "use-best-neutral",
            |f| f.best_effectiveness().is_some_and(|eff| eff > 0.5 && eff < 2.0),
            |f| {
                let text = match f.best_move() {
                    Some(best) => format!(
                        "You have no super-effective moves. Use {} as your best neutral option.",
                        best.name
                    ),
                    None => return,
                };
                f.recommend(text, 75)
            },
            "Without a type edge, the strongest neutral move is used.",
        ),
        Rule::new(
            "switch-all-resisted",
            |f| f.best_effectiveness().is_some_and(|eff| eff <= 0.5) && f.inputs().enemy_hp_pct >= 40.0,
            |f| {
                f.recommend(
                    "Your moves are not very effective against the opponent. Consider switching out.",
                    85,
                )
            },
            "If everything you have is resisted and the opponent is still healthy, switching is preferable.",
        ),
    ]
}

fn tempo_rules() -> [Rule; 6] {
    [
        Rule::new(
            "defend-very-low-hp-no-ko",
            |f| {
                f.inputs().my_hp_pct <= 25.0
                    && f.inputs().has_defensive_move
                    && f.best_effectiveness().map_or(true, |eff| eff < 2.0)
            },
            |f| {
                f.recommend(
                    "You are low on HP and no clear KO is available: a defensive or healing move is reasonable.",
                    88,
                )
            },
            "Without a clear way to remove the opponent and at very low HP, survival comes first.",
        ),
        Rule::new(
            "finish-with-priority",
            |f| f.inputs().enemy_hp_pct <= 25.0 && f.inputs().has_priority_move,
            |f| {
                f.recommend(
                    "The opponent is very low and you have a priority move: use it to secure the KO.",
                    93,
                )
            },
            "Priority lowers the risk of the opponent hitting first in this position.",
        ),
        Rule::new(
            "switch-slower-and-weak",
            |f| {
                let i = f.inputs();
                i.my_hp_pct <= 40.0 && i.speed.is_slower() && i.enemy_advantage
            },
            |f| {
                f.recommend(
                    "You are slower, the opponent has the type advantage and your HP is short: switching is the safest option.",
                    97,
                )
            },
            "Being slower at a type disadvantage raises the odds of fainting before acting.",
        ),
        Rule::new(
            "attack-faster-healthy",
            |f| {
                f.inputs().my_hp_pct >= 40.0
                    && f.inputs().speed.is_faster()
                    && f.best_effectiveness().is_some_and(|eff| eff >= 1.0)
            },
            |f| {
                f.recommend(
                    "You are faster, have reasonable HP and at least a neutral move: attacking is a solid play.",
                    78,
                )
            },
            "Being faster lets you pressure the opponent before it acts.",
        ),
        Rule::new(
            "pressure-faster-super-effective",
            |f| {
                let i = f.inputs();
                (40.0..=80.0).contains(&i.my_hp_pct)
                    && (40.0..=80.0).contains(&i.enemy_hp_pct)
                    && i.speed.is_faster()
                    && f.best_effectiveness().is_some_and(|eff| eff >= 2.0)
            },
            |f| {
                f.recommend(
                    "You are faster with a super-effective move and both sides are at mid HP: heavy pressure can win the game.",
                    89,
                )
            },
            "In even positions a fast super-effective hit usually tips the battle.",
        ),
        Rule::new(
            "warn-no-good-moves",
            |f| {
                let moves = &f.inputs().my_moves;
                !moves.is_empty() && moves.iter().all(|m| m.score < LOW_SCORE_THRESHOLD)
            },
            |f| {
                f.recommend(
                    "None of your moves looks particularly good (low power or poor effectiveness). Consider switching if possible.",
                    60,
                )
            },
            "If every move scores poorly, another Pokemon may have better options.",
        ),
    ]
}

fn matchup_commentary_rules() -> [Rule; 3] {
    [
        Rule::new(
            "no-moves-supplied",
            |f| f.inputs().my_moves.is_empty(),
            |f| {
                f.recommend(
                    "No moves were given, so only general advice based on types and HP is possible.",
                    40,
                )
            },
            "Missing move information limits how precise the advice can be.",
        ),
        Rule::new(
            "same-primary-type",
            |f| {
                let i = f.inputs();
                match (i.my_types.first(), i.enemy_types.first()) {
                    (Some(mine), Some(theirs)) => {
                        mine.eq_ignore_ascii_case(theirs) && !i.my_advantage && !i.enemy_advantage
                    }
                    _ => false,
                }
            },
            |f| {
                let i = f.inputs();
                let text = format!(
                    "Your {} shares its primary type with {}: coverage moves of other types can be decisive.",
                    display_or(&i.my_pokemon, "Pokemon"),
                    display_or(&i.enemy_pokemon, "the opponent"),
                );
                f.recommend(text, 65)
            },
            "In same-type battles, coverage moves usually make the difference.",
        ),
        Rule::new(
            "explain-advantage-by-name",
            |f| {
                let i = f.inputs();
                !i.my_pokemon.is_empty() && !i.enemy_pokemon.is_empty() && i.my_advantage
            },
            |f| {
                let i = f.inputs();
                let text = format!(
                    "{} has a type advantage over {}: keeping this matchup is usually beneficial.",
                    capitalize(&i.my_pokemon),
                    capitalize(&i.enemy_pokemon),
                );
                f.recommend(text, 55)
            },
            "Explains the type advantage using both Pokemon names.",
        ),
    ]
}

fn display_or<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    if name.is_empty() {
        fallback
    } else {
        name
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
