// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! One print invocation: the naming context, the output buffers and the dispatch over
//! metadata nodes. Scope-opening nodes (classes, facades, parts) live here; leaf
//! declarations are in `declarations`, types in `types`.

use std::collections::HashSet;

use itertools::{Itertools, Position};
use kmp_model::flags::ClassKind;
use kmp_model::names::{external_class_name, external_short_class_name};
use kmp_model::{
    Artifact, ArtifactPool, ClassMetadata, DeclarationContainer, KotlinType,
    Metadata, MetadataKind, MetadataNode, MultiFileFacadeMetadata, MultiFilePartMetadata,
    Scoped, SyntheticClassMetadata, TypeParameter, VersionRequirement,
};
use tracing::{debug, trace};

use crate::annotations::Placement;
use crate::context::{Context, ContextFrame};
use crate::flags::class_flags;
use crate::output::OutputStack;
use crate::visited::VisitedSet;

/// Supertypes every class of the given kind has anyway.
const IMPLICIT_SUPER_TYPES: [&str; 3] = ["kotlin/Any", "kotlin/Enum", "kotlin/Annotation"];

const ENUM_ENTRIES_PER_LINE: usize = 5;

const SYNTHETIC_INNER_CLASSES_COMMENT: &str =
    "// Synthetic inner classes - these were generated by the Kotlin compiler from e.g. lambdas";

pub(crate) struct RenderSession<'p> {
    pub(crate) pool: &'p ArtifactPool,
    pub(crate) visited: &'p VisitedSet,
    pub(crate) context: Context<'p>,
    pub(crate) out: OutputStack,
    /// Artifacts already written during this invocation, whatever the route.
    emitted: HashSet<&'p str>,
}

impl<'p> RenderSession<'p> {
    pub(crate) fn new(pool: &'p ArtifactPool, visited: &'p VisitedSet) -> Self {
        Self {
            pool,
            visited,
            context: Context::new(),
            out: OutputStack::new(),
            emitted: HashSet::new(),
        }
    }

    /// Render `artifact` as a top-level entry point. Returns the text, which is empty when
    /// the artifact has no metadata.
    pub(crate) fn render_artifact(&mut self, artifact: &'p Artifact) -> String {
        let Some(root) = MetadataNode::root(artifact) else {
            return String::new();
        };
        self.emitted.insert(&artifact.name);
        self.out.push();
        self.visit(root);
        let text = self.out.pop();
        assert!(
            self.out.is_empty() && self.context.is_empty() && self.out.depth() == 0,
            "unbalanced output after printing {}",
            artifact.name
        );
        text
    }

    pub(crate) fn visit(&mut self, node: MetadataNode<'p>) {
        trace!("Visiting {}", node.kind());
        match node {
            MetadataNode::Class(scoped) => self.class(scoped),
            MetadataNode::FileFacade(scoped) => self.file_facade(scoped),
            MetadataNode::SyntheticClass(scoped) => self.synthetic_class(scoped),
            MetadataNode::MultiFileFacade(scoped) => self.multi_file_facade(scoped),
            MetadataNode::MultiFilePart(scoped) => self.multi_file_part(scoped),
            MetadataNode::Constructor(constructor) => self.constructor(constructor),
            MetadataNode::Function(function) => self.function(function),
            MetadataNode::Property(property) => self.property(property),
            MetadataNode::TypeAlias(alias) => self.type_alias(alias),
            MetadataNode::Type(ty) => self.kotlin_type(ty),
            MetadataNode::TypeParameter(parameter) => self.type_parameter(parameter),
            MetadataNode::ValueParameter { index, parameter } => {
                self.value_parameter(index, parameter, Default::default())
            }
            MetadataNode::Annotation(annotation) => {
                self.kotlin_annotation(annotation, Placement::Inline)
            }
            MetadataNode::VersionRequirement(requirement) => {
                self.version_requirement(requirement, Placement::Block)
            }
        }
    }

    /// Render an artifact owned by the scope being printed, and remember it so no other
    /// parent prints it again.
    fn render_contained(&mut self, artifact: &'p Artifact) {
        if let Some(root) = MetadataNode::root(artifact) {
            self.visited.mark(&artifact.name);
            self.emitted.insert(&artifact.name);
            self.visit(root);
        }
    }

    fn header(&mut self, artifact: &Artifact, metadata: &Metadata) {
        let kind = match &metadata.kind {
            MetadataKind::Class(class) if class.kind == ClassKind::CompanionObject => {
                "companion class"
            }
            MetadataKind::Class(_) => "class",
            MetadataKind::FileFacade(_) => "file facade",
            MetadataKind::SyntheticClass(_) => "synthetic class",
            MetadataKind::MultiFileFacade(_) => "multi-file class facade",
            MetadataKind::MultiFilePart(_) => "multi-file class part",
        };
        let external = external_class_name(&artifact.name);
        if self.context.is_top() {
            if !self.context.package().is_empty() {
                let package = external_class_name(self.context.package());
                self.out.writeln_indented(&format!("package {package}"));
                self.out.newline();
            }
            self.out.writeln_indented("/**");
            self.out.writeln_indented(&format!(
                "* Kotlin {kind} (metadata version {}).",
                metadata.version
            ));
            self.out
                .writeln_indented(&format!("* From Java class: {external}"));
            self.out.writeln_indented("*/");
        } else {
            self.out
                .writeln_indented(&format!("// Kotlin {kind} from Java class: {external}"));
            if let MetadataKind::Class(class) = &metadata.kind
                && let Some(origin) = &class.anonymous_object_origin_name
            {
                self.out.writeln_indented(&format!(
                    "// Anonymous object origin: {}",
                    external_class_name(origin)
                ));
            }
        }
    }

    fn class(&mut self, scoped: Scoped<'p, ClassMetadata>) {
        let Scoped {
            artifact,
            metadata,
            node: class,
        } = scoped;
        self.context.push(ContextFrame::new(artifact, metadata));
        self.header(artifact, metadata);
        self.jvm_annotations(&artifact.annotations, Placement::Block);
        if let Some(requirement) = &class.version_requirement {
            self.version_requirement(requirement, Placement::Block);
        }
        self.context_receivers(&class.context_receivers);

        let name = self.context.resolve_name(&class.class_name, "_");
        let flags = class_flags(class);
        if class.kind == ClassKind::CompanionObject && name == "Companion" {
            self.out.write_indented(flags.trim());
        } else {
            self.out.write_indented(&format!("{flags}{name}"));
        }

        self.register_type_parameters(&class.type_parameters);
        if let Some(origin) = class
            .anonymous_object_origin_name
            .as_deref()
            .and_then(|name| self.pool.get(name))
            .and_then(|origin| origin.metadata.as_ref())
        {
            self.register_origin_type_parameters(&origin.kind);
        }
        self.type_parameter_list(&class.type_parameters, ">");

        self.out.push();
        for constructor in class
            .constructors
            .iter()
            .filter(|c| !c.is_secondary() && !c.is_parameterless())
        {
            self.visit(MetadataNode::Constructor(constructor));
        }
        let primary = self.out.pop();
        self.out
            .write(if primary.is_empty() { " " } else { primary.as_str() });

        let super_types = class
            .super_types
            .iter()
            .filter(|ty| {
                !ty.class_name
                    .as_deref()
                    .is_some_and(|name| IMPLICIT_SUPER_TYPES.contains(&name))
            })
            .collect_vec();
        for (position, ty) in super_types.into_iter().with_position() {
            match position {
                Position::First | Position::Only => self.out.write(": "),
                Position::Middle | Position::Last => self.out.write(", "),
            }
            self.kotlin_type(ty);
            if matches!(position, Position::Last | Position::Only) {
                self.out.write(" ");
            }
        }

        self.out.indent();
        self.out.push();
        self.class_body(artifact, class);

        self.out.push();
        let entries = &class.enum_entry_names;
        for (index, entry) in entries.iter().enumerate() {
            if index > 0 && index % ENUM_ENTRIES_PER_LINE == 0 {
                self.out.newline();
            }
            if index % ENUM_ENTRIES_PER_LINE == 0 {
                self.out.write_indented(entry);
            } else {
                self.out.write(entry);
            }
            if index + 1 != entries.len() {
                self.out.write(",");
                if (index + 1) % ENUM_ENTRIES_PER_LINE != 0 {
                    self.out.write(" ");
                }
            }
        }
        self.out.outdent();
        let enum_entries = self.out.pop();
        let body = self.out.pop();

        if !body.is_empty() {
            self.out.writeln("{");
            if !enum_entries.is_empty() {
                self.out.writeln(&format!("{enum_entries};"));
            }
            self.out.write(&body);
            self.out.writeln_indented("}");
        } else if !enum_entries.is_empty() {
            if entries.len() <= ENUM_ENTRIES_PER_LINE {
                self.out.write("{ ");
                self.out.write(enum_entries.trim());
                self.out.writeln(" }");
            } else {
                self.out.writeln("{");
                self.out.writeln(&enum_entries);
                self.out.writeln_indented("}");
            }
        } else {
            self.out.newline();
            self.out.newline();
        }
        self.context.pop();
    }

    /// Everything between the braces of a class except its enum entries.
    fn class_body(&mut self, artifact: &'p Artifact, class: &'p ClassMetadata) {
        if !class.sealed_subclass_names.is_empty() {
            let names = class
                .sealed_subclass_names
                .iter()
                .map(|name| self.context.resolve_name(name, "."))
                .join(", ");
            self.out
                .writeln_indented(&format!("// Sealed subclasses: {names}"));
        }

        if class.constructors.iter().any(|c| c.is_secondary()) {
            self.out.writeln_indented("// Secondary constructors");
            for constructor in class.constructors.iter().filter(|c| c.is_secondary()) {
                self.visit(MetadataNode::Constructor(constructor));
            }
        }

        if let Some(name) = &class.underlying_property_name {
            self.out
                .writeln_indented(&format!("// Underlying property name: {name}"));
            self.out.push();
            if let Some(ty) = &class.underlying_property_type {
                self.kotlin_type(ty);
            }
            let ty = self.out.pop();
            self.out
                .writeln_indented(&format!("// Underlying property type: {ty}"));
        }

        self.members(&class.declarations);

        let pool = self.pool;
        if let Some(companion) = class
            .companion_class_name()
            .and_then(|name| pool.get(&name))
        {
            self.out.newline();
            self.render_contained(companion);
        }

        let mut first_nested = true;
        for name in class.nested_class_internal_names() {
            let Some(nested) = pool.get(&name) else {
                debug!("Nested class {name} not in pool");
                continue;
            };
            if nested.metadata.is_none() {
                continue;
            }
            if first_nested {
                self.out.newline();
                self.out.writeln_indented("// Nested subclasses");
                self.out.newline();
                first_nested = false;
            }
            self.render_contained(nested);
        }

        self.child_classes(artifact);
    }

    fn file_facade(&mut self, scoped: Scoped<'p, DeclarationContainer>) {
        self.context
            .push(ContextFrame::new(scoped.artifact, scoped.metadata));
        self.header(scoped.artifact, scoped.metadata);
        self.members(scoped.node);
        self.child_classes(scoped.artifact);
        self.context.pop();
    }

    fn synthetic_class(&mut self, scoped: Scoped<'p, SyntheticClassMetadata>) {
        let Scoped {
            artifact,
            metadata,
            node: synthetic,
        } = scoped;
        self.context.push(ContextFrame::new(artifact, metadata));
        let name = self.context.resolve_name(&artifact.name, "_");
        self.header(artifact, metadata);
        self.out
            .write_indented(&format!("/* {} */ class {name}", synthetic.flavor));
        if synthetic.functions.is_empty() {
            self.out.newline();
        } else {
            self.out.writeln(" {");
            self.out.indent();
            self.out.writeln_indented("// Functions");
            for function in &synthetic.functions {
                self.visit(MetadataNode::Function(function));
            }
            self.out.outdent();
            self.out.writeln_indented("}");
        }
        self.context.pop();
    }

    fn multi_file_facade(&mut self, scoped: Scoped<'p, MultiFileFacadeMetadata>) {
        let Scoped {
            artifact,
            metadata,
            node: facade,
        } = scoped;
        self.context.push(ContextFrame::new(artifact, metadata));
        self.header(artifact, metadata);
        self.out.newline();
        self.out.indent();
        let pool = self.pool;
        for part_name in &facade.part_class_names {
            if *part_name == artifact.name {
                continue;
            }
            match pool.get(part_name) {
                Some(part) => {
                    self.render_contained(part);
                    self.out.newline();
                }
                None => debug!("Multi-file part {part_name} not in pool"),
            }
        }
        self.out.outdent();
        self.context.pop();
    }

    fn multi_file_part(&mut self, scoped: Scoped<'p, MultiFilePartMetadata>) {
        let Scoped {
            artifact,
            metadata,
            node: part,
        } = scoped;
        self.context.push(ContextFrame::new(artifact, metadata));
        self.header(artifact, metadata);
        let name = self.context.resolve_name(&artifact.name, "_");
        let short = external_short_class_name(&name);
        if let Some(index) = short.find("__") {
            let prefix = &short[..index];
            let jvm_name = prefix.strip_suffix("Kt").unwrap_or(prefix);
            self.out
                .writeln_indented(&format!("@file:JvmName(\"{jvm_name}\")"));
        }
        self.out.writeln_indented("@file:JvmMultifileClass");
        self.members(&part.declarations);
        self.child_classes(artifact);
        self.context.pop();
    }

    fn section(&mut self, title: &str) {
        self.out.newline();
        self.out.writeln_indented(title);
        self.out.newline();
    }

    /// Type aliases, then properties, then functions; each non-empty group under its own
    /// comment.
    pub(crate) fn members(&mut self, declarations: &'p DeclarationContainer) {
        if !declarations.type_aliases.is_empty() {
            self.section("// Type aliases");
            for alias in &declarations.type_aliases {
                self.visit(MetadataNode::TypeAlias(alias));
            }
        }
        if !declarations.properties.is_empty()
            || !declarations.local_delegated_properties.is_empty()
        {
            self.section("// Properties");
            for property in declarations
                .properties
                .iter()
                .chain(&declarations.local_delegated_properties)
            {
                self.visit(MetadataNode::Property(property));
            }
        }
        if !declarations.functions.is_empty() {
            self.section("// Functions");
            for function in &declarations.functions {
                self.visit(MetadataNode::Function(function));
            }
        }
    }

    /// Compiler-generated artifacts named after `artifact` (lambdas, `$WhenMappings` and
    /// the like) that nothing else has printed.
    fn child_classes(&mut self, artifact: &'p Artifact) {
        self.out.push();
        let pool = self.pool;
        for child in pool.inner_artifacts(&artifact.name) {
            if self.visited.contains(&child.name) || self.emitted.contains(child.name.as_str())
            {
                continue;
            }
            if let Some(root) = MetadataNode::root(child) {
                self.emitted.insert(&child.name);
                self.visit(root);
            }
        }
        let children = self.out.pop();
        if !children.is_empty() {
            self.out.newline();
            self.out.writeln_indented(SYNTHETIC_INNER_CLASSES_COMMENT);
            self.out.newline();
            self.out.write(&children);
        }
    }

    pub(crate) fn register_type_parameters(&mut self, parameters: &[TypeParameter]) {
        for parameter in parameters {
            self.context
                .register_type_parameter(parameter.id, &parameter.name);
        }
    }

    /// Type parameters of the declaration an anonymous object was created in, which the
    /// object's own types may refer to.
    fn register_origin_type_parameters(&mut self, origin: &MetadataKind) {
        if let MetadataKind::Class(class) = origin {
            self.register_type_parameters(&class.type_parameters);
        }
        if let Some(declarations) = origin.declarations() {
            for function in &declarations.functions {
                self.register_type_parameters(&function.type_parameters);
            }
            for property in declarations
                .properties
                .iter()
                .chain(&declarations.local_delegated_properties)
            {
                self.register_type_parameters(&property.type_parameters);
            }
            for alias in &declarations.type_aliases {
                self.register_type_parameters(&alias.type_parameters);
            }
        }
    }

    /// `<T, U : Any>` followed by `close`'s tail, nothing for an empty list.
    pub(crate) fn type_parameter_list(&mut self, parameters: &'p [TypeParameter], close: &str) {
        for (position, parameter) in parameters.iter().with_position() {
            match position {
                Position::First | Position::Only => self.out.write("<"),
                Position::Middle | Position::Last => self.out.write(", "),
            }
            self.visit(MetadataNode::TypeParameter(parameter));
            if matches!(position, Position::Last | Position::Only) {
                self.out.write(close);
            }
        }
    }

    /// `context(A, B)` on a line of its own.
    pub(crate) fn context_receivers(&mut self, receivers: &'p [KotlinType]) {
        for (position, receiver) in receivers.iter().with_position() {
            if matches!(position, Position::First | Position::Only) {
                self.out.write_indented("context(");
            } else {
                self.out.write(", ");
            }
            self.kotlin_type(receiver);
            if matches!(position, Position::Last | Position::Only) {
                self.out.writeln(")");
            }
        }
    }

    pub(crate) fn version_requirement(
        &mut self,
        requirement: &VersionRequirement,
        placement: Placement,
    ) {
        let annotation = format!("@SinceKotlin(\"{requirement}\")");
        match placement {
            Placement::Block => self.out.writeln_indented(&annotation),
            Placement::Inline => self.out.write(&format!(" {annotation}")),
        }
    }
}
