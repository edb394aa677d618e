use crate::data::ReferenceData;
use crate::model::Speed;
use crate::scenario::{MoveSpec, Scenario, MAX_MOVES};
use crate::types::normalize_identifier;
use anyhow::Context;
use std::io::{BufRead, Write};

pub fn prompt_scenario<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    data: &ReferenceData,
) -> anyhow::Result<Scenario> {
    writeln!(out, "=== Pokemon Battle Advisor ===\n")?;

    let (my_pokemon, my_types) = ask_pokemon(input, out, "YOUR Pokemon", data)?;
    let (enemy_pokemon, enemy_types) = ask_pokemon(input, out, "ENEMY Pokemon", data)?;
    let my_hp_pct = ask_number(input, out, "Your current HP (%) 0-100: ")?;
    let enemy_hp_pct = ask_number(input, out, "Enemy current HP (%) 0-100: ")?;
    let moves = ask_moves(input, out, data)?;

    let has_priority_move = ask_yes_no(
        input,
        out,
        "\nDo you have a priority move (e.g. quick attack, extreme speed)? (y/n): ",
    )?;
    let has_defensive_move = ask_yes_no(
        input,
        out,
        "Do you have a useful defensive or healing move this turn? (y/n): ",
    )?;
    let speed = match ask(input, out, "Is your Pokemon faster than the opponent? (faster/slower/unsure): ")?
        .to_lowercase()
        .as_str()
    {
        "faster" | "f" => Speed::Faster,
        "slower" | "s" => Speed::Slower,
        _ => Speed::Unknown,
    };

    Ok(Scenario {
        my_pokemon,
        enemy_pokemon,
        my_types,
        enemy_types,
        my_hp_pct,
        enemy_hp_pct,
        moves,
        has_priority_move,
        has_defensive_move,
        speed,
    })
}

/// Read one trimmed line; end of input reads as an empty answer.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> anyhow::Result<String> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read answer")?;
    Ok(line.trim().to_string())
}

fn ask_number<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> anyhow::Result<f32> {
    let answer = ask(input, out, question)?;
    answer
        .parse()
        .with_context(|| format!("Expected a number, got {answer:?}"))
}

fn ask_yes_no<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> anyhow::Result<bool> {
    Ok(matches!(ask(input, out, question)?.to_lowercase().as_str(), "y" | "yes"))
}

/// Species found in the reference table keep their types; otherwise ask for them.
fn ask_pokemon<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    data: &ReferenceData,
) -> anyhow::Result<(String, Option<Vec<String>>)> {
    let name = ask(input, out, &format!("Name of {label} (e.g. pikachu, charizard): "))?;
    if let Some(species) = data.find_species(&name) {
        writeln!(out, "  -> Found: types = {:?}", species.types)?;
        return Ok((normalize_identifier(&name), None));
    }
    writeln!(out, "  -> Not found, enter the types manually.")?;
    let first = ask(input, out, &format!("Type 1 of {label} (e.g. fire, water, grass): "))?;
    let second = ask(input, out, &format!("Type 2 of {label} (empty if none): "))?;
    let types = [first, second]
        .into_iter()
        .map(|t| t.to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    Ok((normalize_identifier(&name), Some(types)))
}

fn ask_moves<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    data: &ReferenceData,
) -> anyhow::Result<Vec<MoveSpec>> {
    writeln!(out, "\nEnter up to {MAX_MOVES} moves (e.g. water gun, flamethrower). Leave empty to finish.\n")?;
    let mut moves = Vec::new();
    for i in 1..=MAX_MOVES {
        let name = ask(input, out, &format!("Move {i}: "))?;
        if name.is_empty() {
            break;
        }
        if let Some(entry) = data.find_move(&name) {
            writeln!(
                out,
                "  -> Found: type={}, power={}",
                entry.move_type,
                entry.effective_power()
            )?;
            moves.push(MoveSpec::Named(name));
            continue;
        }
        writeln!(out, "  -> Not found, enter the details manually.")?;
        let move_type = ask(input, out, "     Move type: ")?.to_lowercase();
        let power = ask_number(input, out, "     Approximate power (e.g. 40, 60, 90): ")?;
        moves.push(MoveSpec::Manual {
            name,
            move_type,
            power: power.max(0.0).round() as u32,
        });
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MoveEntry, SpeciesEntry};
    use std::io::Cursor;

    fn data() -> ReferenceData {
        let mut data = ReferenceData::builtin();
        data.species.insert(
            "pikachu".to_string(),
            SpeciesEntry {
                id: 25,
                identifier: "pikachu".to_string(),
                types: vec!["electric".to_string()],
            },
        );
        data.moves.insert(
            "thunderbolt".to_string(),
            MoveEntry {
                identifier: "thunderbolt".to_string(),
                move_type: "electric".to_string(),
                power: Some(90),
                priority: 0,
            },
        );
        data
    }

    #[test]
    fn known_and_manual_answers_build_scenario() {
        let answers = "Pikachu\nfakemon\nWater\n\n75\n40\nthunderbolt\nSplash Hit\nwater\n50\n\nn\ny\nfaster\n";
        let mut input = Cursor::new(answers);
        let mut out = Vec::new();
        let scenario = prompt_scenario(&mut input, &mut out, &data()).unwrap();
        assert_eq!(scenario.my_pokemon, "pikachu");
        assert_eq!(scenario.my_types, None);
        assert_eq!(scenario.enemy_types, Some(vec!["water".to_string()]));
        assert_eq!(scenario.my_hp_pct, 75.0);
        assert_eq!(
            scenario.moves,
            vec![
                MoveSpec::Named("thunderbolt".to_string()),
                MoveSpec::Manual {
                    name: "Splash Hit".to_string(),
                    move_type: "water".to_string(),
                    power: 50,
                },
            ]
        );
        assert!(!scenario.has_priority_move);
        assert!(scenario.has_defensive_move);
        assert_eq!(scenario.speed, Speed::Faster);
    }

    #[test]
    fn bad_number_is_an_error() {
        let mut input = Cursor::new("pikachu\npikachu\nlots\n");
        let mut out = Vec::new();
        assert!(prompt_scenario(&mut input, &mut out, &data()).is_err());
    }
}
