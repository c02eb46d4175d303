#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use cricket_stats::{
    data::{Delivery, DismissalKind, EnrichedDelivery, ExtrasType, Match, MatchResult, TossDecision},
    loader::Dataset,
};
use tempfile::{TempDir, tempdir};

pub const HOME: &str = "Mumbai Indians";
pub const AWAY: &str = "Chennai Super Kings";

pub const MATCHES_HEADER: &str = "id,season,city,date,match_type,player_of_match,venue,team1,team2,toss_winner,toss_decision,winner,result,result_margin,target_runs,target_overs,super_over,method,umpire1,umpire2";
pub const DELIVERIES_HEADER: &str = "match_id,inning,batting_team,bowling_team,over,ball,batter,bowler,non_striker,batsman_runs,extra_runs,total_runs,extras_type,is_wicket,player_dismissed,dismissal_kind,fielder";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes a header plus rows as `name`.
    pub fn write_table(&self, name: &str, header: &str, rows: &[&str]) -> PathBuf {
        let mut contents = String::from(header);
        contents.push('\n');
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        self.write(name, &contents)
    }

    /// The two-match sample dataset used by the command-line tests.
    pub fn write_sample(&self) -> (PathBuf, PathBuf) {
        let matches = self.write_table("matches.csv", MATCHES_HEADER, SAMPLE_MATCHES);
        let deliveries = self.write_table("deliveries.csv", DELIVERIES_HEADER, SAMPLE_DELIVERIES);
        (matches, deliveries)
    }
}

pub const SAMPLE_MATCHES: &[&str] = &[
    "1,2019,Mumbai,2019-04-01,League,JJ Bumrah,\"Wankhede Stadium, Mumbai\",Mumbai Indians,Chennai Super Kings,Mumbai Indians,bat,Mumbai Indians,runs,5,12,20,N,NA,A Umpire,B Umpire",
    "2,2020,Chennai,2020-04-03,League,MS Dhoni,\"MA Chidambaram Stadium, Chepauk\",Chennai Super Kings,Delhi Daredevils,Delhi Daredevils,field,Chennai Super Kings,wickets,9,8,20,N,NA,A Umpire,C Umpire",
];

pub const SAMPLE_DELIVERIES: &[&str] = &[
    "1,1,Mumbai Indians,Chennai Super Kings,0,1,RG Sharma,DL Chahar,Q de Kock,4,0,4,,0,NA,NA,NA",
    "1,1,Mumbai Indians,Chennai Super Kings,0,2,RG Sharma,DL Chahar,Q de Kock,6,0,6,,0,NA,NA,NA",
    "1,1,Mumbai Indians,Chennai Super Kings,0,3,RG Sharma,DL Chahar,Q de Kock,0,1,1,wides,0,NA,NA,NA",
    "1,1,Mumbai Indians,Chennai Super Kings,0,3,RG Sharma,DL Chahar,Q de Kock,0,0,0,,1,RG Sharma,caught,MS Dhoni",
    "1,2,Chennai Super Kings,Mumbai Indians,0,1,MS Dhoni,JJ Bumrah,RD Gaikwad,1,0,1,,0,NA,NA,NA",
    "1,2,Chennai Super Kings,Mumbai Indians,0,2,RD Gaikwad,JJ Bumrah,MS Dhoni,0,0,0,,1,RD Gaikwad,bowled,NA",
    "2,1,Delhi Daredevils,Chennai Super Kings,0,1,RR Pant,RA Jadeja,PP Shaw,2,0,2,,0,NA,NA,NA",
    "2,1,Delhi Daredevils,Chennai Super Kings,0,2,RR Pant,RA Jadeja,PP Shaw,0,0,0,,1,RR Pant,lbw,NA",
    "2,2,Chennai Super Kings,Delhi Daredevils,0,1,MS Dhoni,K Rabada,RD Gaikwad,6,0,6,,0,NA,NA,NA",
    "2,2,Chennai Super Kings,Delhi Daredevils,0,2,MS Dhoni,K Rabada,RD Gaikwad,4,0,4,,0,NA,NA,NA",
    "99,1,Mumbai Indians,Chennai Super Kings,0,1,RG Sharma,DL Chahar,Q de Kock,1,0,1,,0,NA,NA,NA",
];

/// A completed 20-over league fixture won by `team1` batting first.
pub fn fixture(id: u64, season: &str, team1: &str, team2: &str) -> Match {
    Match {
        id,
        season: season.to_string(),
        date: None,
        city: None,
        venue: "Wankhede Stadium".to_string(),
        team1: team1.to_string(),
        team2: team2.to_string(),
        toss_winner: team1.to_string(),
        toss_decision: TossDecision::Bat,
        winner: Some(team1.to_string()),
        result: MatchResult::Runs,
        result_margin: Some(10.0),
        target_runs: Some(150),
        target_overs: Some(20.0),
        player_of_match: None,
        match_type: None,
        super_over: false,
        method: None,
        umpire1: None,
        umpire2: None,
    }
}

/// A legal first-innings ball from `HOME` batting against `AWAY`.
pub fn ball(match_id: u64, over: u8, number: u8, batter: &str, bowler: &str, runs: u32) -> Delivery {
    Delivery {
        match_id,
        inning: 1,
        over,
        ball: number,
        batting_team: HOME.to_string(),
        bowling_team: AWAY.to_string(),
        batter: batter.to_string(),
        bowler: Some(bowler.to_string()),
        non_striker: None,
        batsman_runs: runs,
        extra_runs: 0,
        extras_type: None,
        total_runs: runs,
        is_wicket: false,
        player_dismissed: None,
        dismissal_kind: None,
        fielder: None,
    }
}

/// Marks the striker out.
pub fn out(mut delivery: Delivery, kind: DismissalKind) -> Delivery {
    delivery.is_wicket = true;
    delivery.player_dismissed = Some(delivery.batter.clone());
    delivery.dismissal_kind = Some(kind);
    delivery
}

/// Turns the ball into a one-run wide.
pub fn wide(mut delivery: Delivery) -> Delivery {
    delivery.batsman_runs = 0;
    delivery.extra_runs = 1;
    delivery.total_runs = 1;
    delivery.extras_type = Some(ExtrasType::Wides);
    delivery
}

/// Swaps the sides so `AWAY` bats second.
pub fn second_innings(mut delivery: Delivery) -> Delivery {
    delivery.inning = 2;
    std::mem::swap(&mut delivery.batting_team, &mut delivery.bowling_team);
    delivery
}

pub fn dataset(matches: Vec<Match>, deliveries: Vec<Delivery>) -> Dataset {
    Dataset::from_tables(matches, deliveries).expect("dataset joins")
}

pub fn balls(matches: Vec<Match>, deliveries: Vec<Delivery>) -> Vec<EnrichedDelivery> {
    dataset(matches, deliveries).balls
}

/// Six legal balls from one bowler, one per ball number.
pub fn over_of(match_id: u64, over: u8, batter: &str, bowler: &str, runs: [u32; 6]) -> Vec<Delivery> {
    runs.iter()
        .enumerate()
        .map(|(idx, r)| ball(match_id, over, idx as u8 + 1, batter, bowler, *r))
        .collect()
}
