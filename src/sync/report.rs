//! Outcomes of a synchronization run.

use nu_ansi_term::Color;
use std::fmt::Display;

/// Why a (pull request, directory) pair was left untouched.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SkipReason {
    /// The pull request was opened by someone else.
    ForeignAuthor,
    /// The head branch does not exist in the directory.
    BranchMissing,
}

/// What was done to one local directory for one pull request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BranchAction {
    /// Nothing was changed.
    Skipped(SkipReason),
    /// The pull request is closed and its branch was deleted.
    Deleted,
    /// The pull request is open and the branch metadata was brought in line with it.
    Reconciled {
        /// Whether the `issue` entry had to be written.
        issue_updated: bool,
        /// Whether `needs-rebase` is now set.
        needs_rebase: bool,
    },
}

/// Tally of one page of the issue listing.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq)]
pub struct PageOutcome {
    /// The page number, starting at 1.
    pub page: u32,
    /// Whether the listing request itself failed.
    pub listing_failed: bool,
    /// Pull requests on the page.
    pub pull_requests: usize,
    /// Pull requests in repositories with no local directory.
    pub untracked: usize,
    /// Directories whose branch was deleted.
    pub deleted: usize,
    /// Directories whose branch metadata was reconciled.
    pub reconciled: usize,
    /// Directories left untouched.
    pub skipped: usize,
    /// Detail fetches and directories that failed.
    pub failed: usize,
}

impl PageOutcome {
    /// Creates an empty outcome for `page`.
    pub fn new(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Counts the result of synchronizing one directory.
    pub fn record(&mut self, action: BranchAction) {
        match action {
            BranchAction::Skipped(_) => self.skipped += 1,
            BranchAction::Deleted => self.deleted += 1,
            BranchAction::Reconciled { .. } => self.reconciled += 1,
        }
    }
}

/// Aggregate of every page of a run.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct SyncReport {
    /// Outcomes of the pages that ran to completion, ordered by page number.
    pub pages: Vec<PageOutcome>,
    /// Pages whose task panicked before producing an outcome.
    pub aborted_pages: Vec<u32>,
}

impl SyncReport {
    fn sum(&self, f: impl Fn(&PageOutcome) -> usize) -> usize {
        self.pages.iter().map(f).sum()
    }

    /// Pull requests listed across every page.
    pub fn pull_requests(&self) -> usize {
        self.sum(|p| p.pull_requests)
    }

    /// Branches deleted because their pull request was closed.
    pub fn deleted(&self) -> usize {
        self.sum(|p| p.deleted)
    }

    /// Branches whose metadata was reconciled with an open pull request.
    pub fn reconciled(&self) -> usize {
        self.sum(|p| p.reconciled)
    }

    /// Skipped items, including pull requests from untracked repositories.
    pub fn skipped(&self) -> usize {
        self.sum(|p| p.skipped + p.untracked)
    }

    /// Failed items, counting each failed listing or aborted page as one.
    pub fn failed(&self) -> usize {
        self.sum(|p| p.failed + usize::from(p.listing_failed)) + self.aborted_pages.len()
    }
}

impl Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let failed = self.failed();
        let failed = if failed > 0 {
            Color::Red.bold().paint(format!("{} failed", failed))
        } else {
            Color::Default.paint(format!("{} failed", failed))
        };
        write!(
            f,
            "{} pull requests: {} deleted, {} reconciled, {} skipped, {}",
            Color::Blue.paint(self.pull_requests().to_string()),
            Color::Green.paint(self.deleted().to_string()),
            Color::Green.paint(self.reconciled().to_string()),
            self.skipped(),
            failed
        )
    }
}
