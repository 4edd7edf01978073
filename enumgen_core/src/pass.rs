use std::ops::ControlFlow;

use serde::Serialize;
use tracing::debug;
use tracing::trace;

use crate::CommentBinding;
use crate::DirectiveSyntax;
use crate::File;
use crate::Mutation;
use crate::Mutator;
use crate::apply;
use crate::build_block;
use crate::classify;

/// The outcome of one synthesis pass over a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SynthesisReport {
	pub entries: Vec<SynthesisEntry>,
}

/// What a pass did for a single type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisEntry {
	pub type_name: String,
	pub variants: Vec<String>,
	pub mutation: Mutation,
}

impl SynthesisReport {
	/// True when the pass changed the declarations of the file.
	pub fn has_changes(&self) -> bool {
		self.entries.iter().any(|entry| entry.mutation.is_change())
	}

	pub fn inserted(&self) -> impl Iterator<Item = &SynthesisEntry> {
		self.entries
			.iter()
			.filter(|entry| matches!(entry.mutation, Mutation::Inserted { .. }))
	}

	pub fn replaced(&self) -> impl Iterator<Item = &SynthesisEntry> {
		self.entries
			.iter()
			.filter(|entry| matches!(entry.mutation, Mutation::Replaced { .. }))
	}
}

/// Generate or regenerate the constant block of every `type Name string`
/// declaration in `file` that carries a `variants=` directive.
///
/// Declarations without a directive, and directives on declarations of any
/// other shape, are skipped silently. Each type is handled on its own;
/// mutations to the declaration sequence happen one at a time through the
/// cursor so later types see the updated sequence.
pub fn synthesize<B: CommentBinding>(
	file: &mut File<B::Decs>,
	binding: &mut B,
	syntax: &DirectiveSyntax,
) -> SynthesisReport {
	let File {
		decls,
		trailing,
		ids,
		..
	} = file;
	let mut mutator = Mutator {
		binding,
		ids,
		trailing,
		syntax,
	};
	let mut report = SynthesisReport::default();

	apply(decls, |cursor| {
		let Some(type_decl) = cursor.node().as_type() else {
			return ControlFlow::Continue(());
		};
		let Some(directive) = mutator.binding.directive(cursor.node(), syntax) else {
			return ControlFlow::Continue(());
		};

		let Some(candidate) = classify(type_decl).filter(|candidate| candidate.eligible) else {
			debug!(id = %cursor.node().id, "ignoring directive on a type that is not a single string type");
			return ControlFlow::Continue(());
		};
		let Some(spec) = directive.into_enum_spec(candidate.name) else {
			trace!(type_name = candidate.name, "type carries a generated_for marker, skipping");
			return ControlFlow::Continue(());
		};

		let generated = build_block(&spec, syntax);
		let mutation = mutator.add_or_replace(cursor, &spec.type_name, generated);
		report.entries.push(SynthesisEntry {
			type_name: spec.type_name,
			variants: spec.variants,
			mutation,
		});

		ControlFlow::Continue(())
	});

	report
}
