use std::path::PathBuf;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Serialize;

use crate::DirectoryEntry;
use crate::FragmentPlan;
use crate::ProjectContext;
use crate::SrcError;
use crate::SrcResult;
use crate::TreeProfile;
use crate::classify;
use crate::render_fragment;
use crate::write_fragment;

/// The directories whose fragments were written for one tree.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
	/// Name of the tree that was processed.
	pub tree: String,
	/// Directories in the order their fragments were written.
	pub written: Vec<PathBuf>,
}

/// Reports for every tree processed by [`generate_all`], in order.
#[derive(Debug, Default, Deref, DerefMut)]
pub struct GenerateSummary(
	#[deref]
	#[deref_mut]
	Vec<GenerateReport>,
);

impl GenerateSummary {
	/// Total number of fragments written across all trees.
	pub fn written_count(&self) -> usize {
		self.iter().map(|report| report.written.len()).sum()
	}
}

/// Why a fragment on disk no longer matches what would be generated.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleKind {
	/// No fragment exists in this directory yet.
	Missing,
	/// A fragment exists but its contents differ.
	Outdated,
}

/// A fragment that `update` would rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct StaleFragment {
	pub tree: String,
	pub path: PathBuf,
	pub kind: StaleKind,
	/// Contents currently on disk; empty when missing.
	pub current: String,
	pub expected: String,
}

/// Result of comparing one or more trees' fragments with disk.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
	/// Number of fragments compared.
	pub checked: usize,
	pub stale: Vec<StaleFragment>,
}

impl CheckResult {
	/// Returns true if every fragment is present and up to date.
	pub fn is_ok(&self) -> bool {
		self.stale.is_empty()
	}

	/// Fold another tree's result into this one.
	pub fn merge(&mut self, other: CheckResult) {
		self.checked += other.checked;
		self.stale.extend(other.stale);
	}
}

/// Render the fragment for a single walked directory.
pub fn plan_fragment(
	entry: &DirectoryEntry,
	profile: &TreeProfile,
	fragment_name: &str,
) -> FragmentPlan {
	let files = classify(&entry.files);

	FragmentPlan {
		directory: entry.path.clone(),
		path: entry.path.join(fragment_name),
		contents: render_fragment(&entry.subdirectories, &files, profile),
	}
}

/// Lazily render every fragment of `profile`'s tree in walk order.
///
/// Nothing is written. Each directory is read only when its plan is
/// requested.
pub fn plan_tree<'a>(
	ctx: &'a ProjectContext,
	profile: &'a TreeProfile,
) -> impl Iterator<Item = SrcResult<FragmentPlan>> + 'a {
	let fragment_name = ctx.fragment_name();
	ctx.walk(profile)
		.map(move |entry| entry.map(|entry| plan_fragment(&entry, profile, fragment_name)))
}

/// Regenerate every fragment in `profile`'s tree.
///
/// Stops at the first failure; fragments already written stay on disk.
pub fn generate_tree(ctx: &ProjectContext, profile: &TreeProfile) -> SrcResult<GenerateReport> {
	generate_tree_with(ctx, profile, |_| {})
}

/// Like [`generate_tree`], calling `on_write` after each fragment lands on
/// disk.
pub fn generate_tree_with<F>(
	ctx: &ProjectContext,
	profile: &TreeProfile,
	mut on_write: F,
) -> SrcResult<GenerateReport>
where
	F: FnMut(&FragmentPlan),
{
	let mut written = Vec::new();

	for plan in plan_tree(ctx, profile) {
		let plan = plan?;
		write_fragment(&plan.path, &plan.contents)?;
		tracing::info!(tree = %profile.name, path = %plan.path.display(), "wrote fragment");
		on_write(&plan);
		written.push(plan.directory);
	}

	Ok(GenerateReport {
		tree: profile.name.clone(),
		written,
	})
}

/// Regenerate every configured tree, in order.
pub fn generate_all(ctx: &ProjectContext) -> SrcResult<GenerateSummary> {
	generate_all_with(ctx, |_, _| {})
}

/// Like [`generate_all`], calling `on_write` with the tree and plan after
/// each fragment is written.
pub fn generate_all_with<F>(ctx: &ProjectContext, mut on_write: F) -> SrcResult<GenerateSummary>
where
	F: FnMut(&TreeProfile, &FragmentPlan),
{
	let mut summary = GenerateSummary::default();

	for profile in ctx.trees() {
		summary.push(generate_tree_with(ctx, profile, |plan| {
			on_write(profile, plan);
		})?);
	}

	Ok(summary)
}

/// Compare every fragment `update` would write for `profile` against disk.
pub fn check_tree(ctx: &ProjectContext, profile: &TreeProfile) -> SrcResult<CheckResult> {
	let mut result = CheckResult::default();

	for plan in plan_tree(ctx, profile) {
		let plan = plan?;
		result.checked += 1;

		let (kind, current) = match std::fs::read(&plan.path) {
			Ok(bytes) if bytes == plan.contents.as_bytes() => continue,
			Ok(bytes) => (StaleKind::Outdated, String::from_utf8_lossy(&bytes).into_owned()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => (StaleKind::Missing, String::new()),
			Err(source) => {
				return Err(SrcError::FragmentRead {
					path: plan.path,
					source,
				});
			}
		};

		tracing::debug!(tree = %profile.name, path = %plan.path.display(), ?kind, "stale fragment");
		result.stale.push(StaleFragment {
			tree: profile.name.clone(),
			path: plan.path,
			kind,
			current,
			expected: plan.contents,
		});
	}

	Ok(result)
}

/// Check every configured tree, in order.
pub fn check_all(ctx: &ProjectContext) -> SrcResult<CheckResult> {
	let mut result = CheckResult::default();

	for profile in ctx.trees() {
		result.merge(check_tree(ctx, profile)?);
	}

	Ok(result)
}
