//! Historical match log ingestion.
//!
//! The log is a CSV file where each row records both players' full state plus
//! the 12 button states pressed on that frame. Column names are a collaborator
//! contract with the recording side; [`MatchLogRow`] mirrors them one to one.
//!
//! Flag columns appear as `0`/`1` in some recordings and `True`/`False` in
//! others (depending on the tool that wrote the log), so boolean fields accept
//! both spellings.

use std::{fs::File, path::Path};

use anyhow::{Context as _, bail};
use kumite_features::{ButtonLabels, FeatureVector, extract};
use kumite_state::{GameSnapshot, PlayerId, PlayerSnapshot};
use serde::{Deserialize, Deserializer, de};

/// One frame of a recorded match: both players' state plus button labels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchLogRow {
    pub player1_x_coord: i32,
    pub player2_x_coord: i32,
    pub player1_y_coord: i32,
    pub player2_y_coord: i32,
    pub player1_health: i32,
    pub player2_health: i32,
    #[serde(deserialize_with = "bool_flag")]
    pub player1_is_jumping: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub player2_is_jumping: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub player1_is_crouching: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub player2_is_crouching: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub player1_in_move: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub player2_in_move: bool,
    pub player1_move_id: i32,
    pub player2_move_id: i32,
    /// Signed horizontal distance as recorded, from player 1's perspective.
    /// Not used for feature construction; `diff` is recomputed per role by
    /// the shared extractor so the sign convention cannot drift.
    pub diff: i32,
    pub timer: u32,
    #[serde(deserialize_with = "bool_flag")]
    pub up: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub down: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub left: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub right: bool,
    #[serde(rename = "Y", deserialize_with = "bool_flag")]
    pub y: bool,
    #[serde(rename = "B", deserialize_with = "bool_flag")]
    pub b: bool,
    #[serde(rename = "A", deserialize_with = "bool_flag")]
    pub a: bool,
    #[serde(rename = "R", deserialize_with = "bool_flag")]
    pub r: bool,
    #[serde(rename = "L", deserialize_with = "bool_flag")]
    pub l: bool,
    #[serde(rename = "X", deserialize_with = "bool_flag")]
    pub x: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub select: bool,
    #[serde(deserialize_with = "bool_flag")]
    pub start: bool,
}

fn bool_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "1" | "true" | "True" | "TRUE" => Ok(true),
        "0" | "false" | "False" | "FALSE" => Ok(false),
        other => Err(de::Error::invalid_value(
            de::Unexpected::Str(other),
            &"a 0/1 or true/false flag",
        )),
    }
}

impl MatchLogRow {
    /// Reassembles the live-state shape so feature construction goes through
    /// the same extractor as inference.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player1: PlayerSnapshot {
                x_coord: self.player1_x_coord,
                y_coord: self.player1_y_coord,
                health: self.player1_health,
                is_jumping: self.player1_is_jumping,
                is_crouching: self.player1_is_crouching,
                is_in_move: self.player1_in_move,
                move_id: self.player1_move_id,
            },
            player2: PlayerSnapshot {
                x_coord: self.player2_x_coord,
                y_coord: self.player2_y_coord,
                health: self.player2_health,
                is_jumping: self.player2_is_jumping,
                is_crouching: self.player2_is_crouching,
                is_in_move: self.player2_in_move,
                move_id: self.player2_move_id,
            },
            timer: self.timer,
        }
    }

    /// Extracts features for the given player role via the shared schema.
    #[must_use]
    pub fn features(&self, player: PlayerId) -> FeatureVector {
        extract(&self.snapshot(), player)
    }

    /// Button labels in canonical order.
    #[must_use]
    pub fn labels(&self) -> ButtonLabels {
        ButtonLabels::new([
            self.up,
            self.down,
            self.left,
            self.right,
            self.y,
            self.b,
            self.a,
            self.r,
            self.l,
            self.x,
            self.select,
            self.start,
        ])
    }
}

/// Reads all rows of a match log CSV.
pub fn read_match_log<P>(path: P) -> anyhow::Result<Vec<MatchLogRow>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<MatchLogRow>, _>>()
        .with_context(|| format!("failed to parse {}", path.display()))?;
    if rows.is_empty() {
        bail!("{} contains no rows", path.display());
    }
    Ok(rows)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const HEADER: &str = "player1_x_coord,player2_x_coord,player1_y_coord,player2_y_coord,\
         player1_health,player2_health,player1_is_jumping,player2_is_jumping,\
         player1_is_crouching,player2_is_crouching,player1_in_move,player2_in_move,\
         player1_move_id,player2_move_id,diff,timer,\
         up,down,left,right,Y,B,A,R,L,X,select,start";

    fn parse_rows(body: &str) -> Vec<MatchLogRow> {
        let data = format!("{HEADER}\n{body}");
        csv::Reader::from_reader(data.as_bytes())
            .deserialize()
            .collect::<Result<Vec<MatchLogRow>, _>>()
            .unwrap()
    }

    #[test]
    fn test_parse_numeric_flags() {
        let rows =
            parse_rows("100,150,10,0,80,80,1,0,0,1,0,1,0,7,50,60,0,0,1,0,0,1,0,0,0,0,0,0");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.player1_x_coord, 100);
        assert!(row.player1_is_jumping);
        assert!(!row.player2_is_jumping);
        assert!(row.left && row.b);
        assert!(!row.select && !row.start);
    }

    #[test]
    fn test_parse_python_style_flags() {
        let rows = parse_rows(
            "100,150,10,0,80,80,True,False,False,True,False,True,0,7,50,60,\
             False,False,True,False,False,True,False,False,False,False,False,False",
        );
        assert!(rows[0].player1_is_jumping);
        assert!(rows[0].left);
    }

    #[test]
    fn test_snapshot_round_trips_both_players() {
        let rows =
            parse_rows("100,150,10,0,80,75,1,0,0,1,0,1,3,7,50,60,0,0,0,0,0,0,0,0,0,0,0,0");
        let snapshot = rows[0].snapshot();
        assert_eq!(snapshot.player1.x_coord, 100);
        assert_eq!(snapshot.player2.x_coord, 150);
        assert_eq!(snapshot.player1.move_id, 3);
        assert_eq!(snapshot.player2.health, 75);
        assert_eq!(snapshot.timer, 60);
        // the recorded diff column matches player 1's perspective
        assert_eq!(
            rows[0].diff,
            snapshot.player2.x_coord - snapshot.player1.x_coord
        );
    }

    #[test]
    fn test_labels_follow_canonical_order() {
        let rows =
            parse_rows("0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,0,0,1,0,0,1,0,0,0,1,1");
        let labels = rows[0].labels();
        assert_eq!(
            labels.values(),
            &[
                true, false, false, true, false, false, true, false, false, false, true, true
            ]
        );
    }

    #[test]
    fn test_read_match_log_missing_file() {
        assert!(read_match_log("/no/such/log.csv").is_err());
    }
}
