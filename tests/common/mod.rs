//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a prio command with no ambient configuration
pub fn prio() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("prio"));
    cmd.env_remove("PRIO_FORMAT").env_remove("RUST_LOG");
    cmd
}

/// Temporary directory holding input files
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write a file and return its absolute path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// prio running inside the workspace, isolated from the user config
    pub fn prio(&self) -> Command {
        let mut cmd = prio();
        cmd.current_dir(self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join(".config"))
            .env("HOME", self.dir.path());
        cmd
    }
}

pub const MOSCOW_REQUIREMENTS: &str = "\
Альтернатива,Критерий,Стейкхолдер,Оценка
REQ-1,Польза,S1,100% M
REQ-1,Польза,S2,100% C
REQ-2,Польза,S1,\"50% M, 50% S\"
REQ-3,Польза,S1,100% W
";

pub const MOSCOW_WEIGHTS: &str = "\
Стейкхолдер,Вес
S1,1.0
S2,3.0
";

pub const KANO_SURVEY: &str = "\
Альтернатива,Стейкхолдер,Функциональный,Дисфункциональный,Вес
Поиск,S1,Must-be,Must-be,3
Поиск,S2,Indifferent,Indifferent,1
Экспорт,S1,Attractive,Indifferent,1
";

pub const TOPSIS_MATRIX: &str = "\
Альтернатива,Вес стейкхолдера,X
A,1,0
B,1,1
C,1,2
";

pub const LINGUISTIC_RATINGS: &str = "\
Альтернатива,Польза,Риск
A,Очень высокая,Высокая
B,Низкая,Очень низкая
";

pub const AHP_CRITERIA: &str = "\
Критерий,Польза,Риск
Польза,1,3
Риск,1/3,1
";

pub const AHP_ALTERNATIVES: &str = "\
Альтернатива,Эксперт,Польза,Риск
A,E1,\"(0.6, 0.8, 1.0)\",\"(0.2, 0.3, 0.4)\"
A,E2,\"(0.4, 0.6, 0.8)\",\"(0.2, 0.3, 0.4)\"
B,E1,\"(0.1, 0.2, 0.3)\",\"(0.1, 0.2, 0.3)\"
B,E2,\"(0.1, 0.2, 0.3)\",\"(0.1, 0.2, 0.3)\"
";

pub const AHP_WEIGHTS: &str = "\
Эксперт,Вес
E1,0.5
E2,0.5
";

pub const AHP_TYPE2: &str = "\
Эксперт,Вес,A > B
E1,1.0,Слабо
";

pub const DELPHI_IT2: &str = "\
Альтернатива,Эксперт,Вес эксперта,Польза
A,E1,1.0,Высокая уверенность – Высокая
";

pub const DELPHI_IFS: &str = "\
Альтернатива,Эксперт,Вес эксперта,Польза
A,E1,0.5,\"(0.7, 0.2, 0.1)\"
A,E2,0.5,\"(0.5, 0.4, 0.1)\"
";

/// π ranges 1.0 and 0.875, so the confidence index lands on 0.0625
pub const DELPHI_IFS_TIE: &str = "\
Альтернатива,Эксперт,Вес эксперта,Польза,Риск
A,E1,0.5,\"(0, 0, 1)\",\"(0, 0.125, 0.875)\"
A,E2,0.5,\"(1, 0, 0)\",\"(1, 0, 0)\"
";
