use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::engine::score::Placement;
use crate::state::{Choice, Player};
use crate::tiles::Tile;
use crate::types::{Orientation, PlayerId, Pose, Rotation, Side, TileId};

/// Why a tile was picked to open a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartKind {
    ZeroTriplet,
    Triplet,
    HighestTile,
}

/// A legal choice together with its evaluated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored<'t> {
    pub choice: Choice<'t>,
    pub placement: Placement,
}

/// Outcome of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Committed {
    pub tile_id: TileId,
    pub row: usize,
    pub col: usize,
    pub pose: Pose,
    pub placement: Placement,
}

/// Opening tile for one tray: 0-0-0, else the best triplet, else the best tile.
/// Ties keep the earliest tile in the tray.
pub fn determine_first_tile(tray: &[Tile]) -> Option<(&Tile, StartKind)> {
    if let Some(t) = tray.iter().find(|t| t.is_zero_triplet()) {
        return Some((t, StartKind::ZeroTriplet));
    }
    let beats = |acc: Option<&Tile>, t: &Tile| acc.map_or(true, |b| t.value() > b.value());
    let mut triplet: Option<&Tile> = None;
    let mut highest: Option<&Tile> = None;
    for t in tray {
        if t.is_triplet() && beats(triplet, t) {
            triplet = Some(t);
        }
        if beats(highest, t) {
            highest = Some(t);
        }
    }
    triplet
        .map(|t| (t, StartKind::Triplet))
        .or(highest.map(|t| (t, StartKind::HighestTile)))
}

/// Picks the opening player. A zero triplet wins immediately; otherwise the highest triplet,
/// otherwise the highest tile. Earlier seats win ties.
pub fn who_is_first(players: &[Player]) -> Option<(PlayerId, TileId, StartKind)> {
    let mut best: Option<(PlayerId, &Tile, StartKind)> = None;
    for (seat, p) in players.iter().enumerate() {
        let Some((tile, kind)) = determine_first_tile(p.tray()) else {
            continue;
        };
        match kind {
            StartKind::ZeroTriplet => {
                log::info!("  player '{}' has tile '{}'!", p.name, tile);
                return Some((seat, tile.id, kind));
            }
            StartKind::Triplet => {
                let better = match best {
                    Some((_, b, StartKind::Triplet)) => tile.value() > b.value(),
                    _ => true,
                };
                if better {
                    best = Some((seat, tile, kind));
                }
            }
            StartKind::HighestTile => {
                let better = match best {
                    None => true,
                    Some((_, b, StartKind::HighestTile)) => tile.value() > b.value(),
                    Some(_) => false,
                };
                if better {
                    best = Some((seat, tile, kind));
                }
            }
        }
    }
    best.map(|(seat, tile, kind)| (seat, tile.id, kind))
}

/// Rotation a tray tile needs so that the face found on `matched` (at rotation 0) ends up
/// against the target's `target` side.
pub fn rotation_for(target: Side, matched: Side, tray_orientation: Orientation) -> Rotation {
    let up = tray_orientation == Orientation::Up;
    let pick = |if_up: Rotation, if_down: Rotation| if up { if_up } else { if_down };
    match (target, matched) {
        (Side::Left, Side::Left) => pick(Rotation::R120, Rotation::R240),
        (Side::Left, Side::Right) => Rotation::R0,
        (Side::Left, Side::Middle) => pick(Rotation::R240, Rotation::R120),
        (Side::Right, Side::Left) => Rotation::R0,
        (Side::Right, Side::Right) => pick(Rotation::R240, Rotation::R120),
        (Side::Right, Side::Middle) => pick(Rotation::R120, Rotation::R240),
        (Side::Middle, Side::Left) => pick(Rotation::R240, Rotation::R120),
        (Side::Middle, Side::Right) => pick(Rotation::R120, Rotation::R240),
        (Side::Middle, Side::Middle) => Rotation::R0,
    }
}

/// Enumerates candidate placements in discovery order: the opening tile on an empty board,
/// otherwise every (open-faced tile, open side, tray tile) with a matching face.
pub fn candidates<'t>(
    board: &Board,
    open_faced: &[(usize, usize)],
    tray: &'t [Tile],
) -> Vec<Choice<'t>> {
    let mut out = Vec::new();

    if board.is_empty() {
        if let Some((tile, _)) = determine_first_tile(tray) {
            let (row, col) = board.rules().center();
            out.push(Choice {
                tile,
                row,
                col,
                pose: Pose::new(Board::orientation_at(row, col), Rotation::R0),
            });
        }
        return out;
    }

    for &(pr, pc) in open_faced {
        let Some(target) = board.get(pr, pc) else {
            continue;
        };
        let tray_orientation = target.pose.orientation.opposite();
        let upright = Pose::new(tray_orientation, Rotation::R0);

        for side in Side::all() {
            if !board.side_is_open(pr, pc, side) {
                continue;
            }
            let Some((row, col)) = board.neighbour_cell(pr, pc, side) else {
                continue;
            };
            let face = target.tile.face(side, target.pose);
            for tile in tray {
                let matched = Side::all()
                    .into_iter()
                    .find(|&s| tile.face(s, upright).matches(face));
                if let Some(matched) = matched {
                    let rotation = rotation_for(side, matched, tray_orientation);
                    out.push(Choice {
                        tile,
                        row,
                        col,
                        pose: Pose::new(tray_orientation, rotation),
                    });
                }
            }
        }
    }
    out
}

/// Highest-scoring legal choice; the first one found wins a tie.
pub fn best_choice<'t>(board: &Board, choices: &[Choice<'t>]) -> Option<Scored<'t>> {
    let mut best: Option<Scored<'t>> = None;
    for choice in choices {
        let Some(placement) = board.evaluate(choice) else {
            continue;
        };
        if best.map_or(true, |b| placement.score > b.placement.score) {
            best = Some(Scored {
                choice: *choice,
                placement,
            });
        }
    }
    best
}

/// Keeps only placed tiles that can still be extended, then appends the newly placed one if it can.
pub fn refresh_open_faced(board: &Board, open_faced: &mut Vec<(usize, usize)>, placed: (usize, usize)) {
    open_faced.retain(|&(r, c)| (r, c) != placed && board.has_open_side(r, c));
    if board.has_open_side(placed.0, placed.1) {
        open_faced.push(placed);
    }
}

/// Searches the player's tray against the board and commits the best move, if any.
/// The tile moves tray → board only once the board has accepted it.
pub fn play_best(
    board: &mut Board,
    player: &mut Player,
    open_faced: &mut Vec<(usize, usize)>,
) -> Option<Committed> {
    let (tile_id, row, col, rotation) = {
        let choices = candidates(board, open_faced, player.tray());
        let best = best_choice(board, &choices);
        log::debug!(
            "  {} candidate(s) for '{}', best: {}",
            choices.len(),
            player.name,
            best.map_or_else(
                || "none".to_string(),
                |b| format!("{} @ ({},{}) for {}", b.choice.tile, b.choice.row, b.choice.col, b.placement.score)
            )
        );
        let best = best?;
        (best.choice.tile.id, best.choice.row, best.choice.col, best.choice.pose.rotation)
    };

    let (pos, tile) = player.take_from_tray(tile_id)?;
    match board.place(tile, row, col, rotation, Some(player.id)) {
        Ok(placement) => {
            player.score += placement.score;
            refresh_open_faced(board, open_faced, (row, col));
            Some(Committed {
                tile_id,
                row,
                col,
                pose: Pose::new(Board::orientation_at(row, col), rotation),
                placement,
            })
        }
        Err(rejected) => {
            log::warn!("--- unable to place evaluated choice: {rejected} ---");
            player.restore_to_tray(pos, rejected.tile);
            None
        }
    }
}
