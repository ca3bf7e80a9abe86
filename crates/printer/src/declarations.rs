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

//! Leaf declarations: constructors, functions, properties, type aliases and their
//! parameters.

use itertools::{Itertools, Position};
use kmp_model::descriptor::{external_full_field_description, external_full_method_description};
use kmp_model::flags::{
    AccessorFlag, ConstructorFlag, PropertyFlag, ValueParameterFlag, Variance,
};
use kmp_model::{
    Artifact, BitEnum, Constructor, Function, JvmMethod, JvmMethodSignature,
    MetadataNode, Property, PropertyAccessor, TypeAlias, TypeParameter, ValueParameter,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::annotations::{Placement, constant_to_string, is_printable};
use crate::flags::{
    accessor_flags, function_flags, property_flags, type_parameter_flags, value_parameter_flags,
};
use crate::session::RenderSession;

lazy_static! {
    static ref ANONYMOUS_PARAMETER: Regex = Regex::new(r"^<(.*) (\d+)>$").unwrap();
    static ref SPECIAL_FUNCTION_NAME: Regex = Regex::new(r"^<(.*)>$").unwrap();
}

const UNIT: &str = "kotlin/Unit";

/// Whether a constructor parameter also declares a property.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mutability {
    #[default]
    Plain,
    Val,
    Var,
}

/// `<anonymous parameter 1>` -> `p1`, `<set-?>` -> `p0`.
fn parameter_name(name: &str) -> String {
    ANONYMOUS_PARAMETER
        .replace(name, "p$2")
        .replace("<set-?>", "p0")
}

impl<'p> RenderSession<'p> {
    /// The JVM method a signature refers to, looked up in the signature's owner when it
    /// names one and in `artifact` otherwise.
    fn resolve_method(
        &self,
        artifact: &'p Artifact,
        signature: &JvmMethodSignature,
    ) -> Option<(&'p Artifact, &'p JvmMethod)> {
        let owner = match &signature.owner {
            Some(owner) => match self.pool.get(owner) {
                Some(owner) => owner,
                None => {
                    debug!("Owner {owner} of method {} not in pool", signature.name);
                    return None;
                }
            },
            None => artifact,
        };
        let method = owner.find_method(&signature.name, &signature.descriptor);
        if method.is_none() {
            warn!(
                "Method {}{} referenced by metadata not found in {}",
                signature.name, signature.descriptor, owner.name
            );
        }
        method.map(|method| (owner, method))
    }

    fn method_description(&mut self, owner: &Artifact, method: &JvmMethod) {
        match external_full_method_description(
            &owner.name,
            method.access,
            &method.name,
            &method.descriptor,
        ) {
            Ok(description) => self.out.write(&description),
            Err(e) => {
                warn!("Invalid descriptor for method {}: {e}", method.name);
                self.out.write(&format!(
                    "invalid method descriptor: {} {}",
                    method.name, method.descriptor
                ));
            }
        }
    }

    pub(crate) fn constructor(&mut self, constructor: &'p Constructor) {
        let artifact = self.context.current().artifact;
        let secondary = constructor.is_secondary();
        let placement = if secondary {
            Placement::Block
        } else {
            Placement::Inline
        };

        if let Some(requirement) = &constructor.version_requirement {
            self.version_requirement(requirement, placement);
        }

        let mut annotated = false;
        if constructor.flags.contains(ConstructorFlag::HasAnnotations)
            && let Some((_, method)) = constructor
                .jvm_signature
                .as_ref()
                .and_then(|signature| self.resolve_method(artifact, signature))
            && method.annotations.iter().any(is_printable)
        {
            self.out.push();
            self.jvm_annotations(&method.annotations, placement);
            let annotations = self.out.pop();
            if !secondary {
                self.out.write(" ");
            }
            self.out.write(&annotations);
            annotated = true;
        }

        if secondary || constructor.version_requirement.is_some() || annotated {
            if secondary {
                self.out.write_indented("");
            } else {
                self.out.write(" ");
            }
            self.out.write("constructor");
        }
        self.out.write("(");
        for (index, parameter) in constructor.value_parameters.iter().enumerate() {
            let mutability = self.constructor_parameter_mutability(&parameter.name);
            self.value_parameter(index, parameter, mutability);
        }
        self.out.write(") ");
        if secondary {
            self.out.writeln("{ }");
        }
    }

    /// A constructor parameter is a `val` or `var` when the class has a property of the
    /// same name with a JVM getter or setter.
    fn constructor_parameter_mutability(&self, name: &str) -> Mutability {
        let Some(declarations) = self.context.current().metadata.kind.declarations() else {
            return Mutability::Plain;
        };
        let has_signature = |accessor: &Option<PropertyAccessor>| {
            accessor.as_ref().is_some_and(|a| a.signature.is_some())
        };
        match declarations.properties.iter().find(|p| p.name == name) {
            Some(property) if has_signature(&property.setter) => Mutability::Var,
            Some(property) if has_signature(&property.getter) => Mutability::Val,
            _ => Mutability::Plain,
        }
    }

    pub(crate) fn value_parameter(
        &mut self,
        index: usize,
        parameter: &'p ValueParameter,
        mutability: Mutability,
    ) {
        if index != 0 {
            self.out.write(", ");
        }
        match mutability {
            Mutability::Val => self.out.write("val "),
            Mutability::Var => self.out.write("var "),
            Mutability::Plain => {}
        }
        self.out.write(&value_parameter_flags(parameter.flags));
        if parameter.vararg_element_type.is_some() {
            self.out.write("vararg ");
        }
        self.out.write(&parameter_name(&parameter.name));
        self.out.write(": ");

        // The array type is written first and replaced by the element type for varargs.
        self.out.push();
        self.visit(MetadataNode::Type(&parameter.ty));
        if let Some(element) = &parameter.vararg_element_type {
            self.out.reset();
            self.visit(MetadataNode::Type(element));
        }
        let ty = self.out.pop();
        self.out.write(&ty);

        if parameter.flags.contains(ValueParameterFlag::HasDefaultValue) {
            self.out.write(" = /* default value */");
        }
    }

    fn value_parameters(&mut self, parameters: &'p [ValueParameter]) {
        for (index, parameter) in parameters.iter().enumerate() {
            self.visit(MetadataNode::ValueParameter { index, parameter });
        }
    }

    pub(crate) fn type_parameter(&mut self, parameter: &'p TypeParameter) {
        if parameter.variance != Variance::Invariant {
            self.out.write(&format!("{} ", parameter.variance));
        }
        self.out.write(type_parameter_flags(parameter.flags));
        self.kotlin_annotations(&parameter.annotations, Placement::Inline);
        self.out.write(&parameter.name);
        for (position, bound) in parameter.upper_bounds.iter().with_position() {
            match position {
                Position::First | Position::Only => self.out.write(" : "),
                Position::Middle | Position::Last => self.out.write(", "),
            }
            self.visit(MetadataNode::Type(bound));
        }
    }

    pub(crate) fn function(&mut self, function: &'p Function) {
        let artifact = self.context.current().artifact;
        if let Some((_, method)) = function
            .jvm_signature
            .as_ref()
            .and_then(|signature| self.resolve_method(artifact, signature))
        {
            self.jvm_annotations(&method.annotations, Placement::Block);
        }
        if let Some(requirement) = &function.version_requirement {
            self.visit(MetadataNode::VersionRequirement(requirement));
        }
        self.context_receivers(&function.context_receivers);

        self.out.write_indented(&function_flags(function));
        self.out.write("fun ");
        self.register_type_parameters(&function.type_parameters);
        self.type_parameter_list(&function.type_parameters, "> ");
        if let Some(receiver) = &function.receiver_type {
            self.receiver_type(receiver);
        }
        let name = SPECIAL_FUNCTION_NAME.replace(&function.name, "$1");
        self.out.write(&name);
        self.out.write("(");
        self.value_parameters(&function.value_parameters);
        self.out.write(")");
        if function.return_type.class_name.as_deref() != Some(UNIT) {
            self.out.write(": ");
            self.visit(MetadataNode::Type(&function.return_type));
        }
        self.out.writeln(" { }");
    }

    pub(crate) fn property(&mut self, property: &'p Property) {
        let artifact = self.context.current().artifact;
        if let Some((_, method)) = property
            .synthetic_method_for_annotations
            .as_ref()
            .and_then(|signature| self.resolve_method(artifact, signature))
        {
            self.jvm_annotations(&method.annotations, Placement::Block);
        }
        if let Some(requirement) = &property.version_requirement {
            self.visit(MetadataNode::VersionRequirement(requirement));
        }
        self.context_receivers(&property.context_receivers);

        self.out.write_indented(&property_flags(property));
        self.register_type_parameters(&property.type_parameters);
        self.type_parameter_list(&property.type_parameters, "> ");
        if let Some(receiver) = &property.receiver_type {
            self.receiver_type(receiver);
        }
        self.out.write(&property.name);
        self.out.write(": ");
        self.visit(MetadataNode::Type(&property.ty));

        if property.flags.contains(PropertyFlag::HasConstant)
            && let Some(field) = &property.backing_field
            && let Some(constant) = artifact
                .find_field(&field.name, &field.descriptor)
                .and_then(|field| field.constant_value.as_ref())
        {
            self.out
                .write(&format!(" = {}", constant_to_string(constant)));
        }

        if let Some(field) = &property.backing_field {
            self.out.indent();
            self.out.newline();
            self.out.write_indented("// backing field: ");
            match external_full_field_description(BitEnum::new(), &field.name, &field.descriptor)
            {
                Ok(description) => self.out.write(&description),
                Err(e) => {
                    warn!("Invalid descriptor for backing field {}: {e}", field.name);
                    self.out.write(&format!(
                        "invalid field descriptor: {}:{}",
                        field.name, field.descriptor
                    ));
                }
            }
            self.out.outdent();
        }

        if let Some(signature) = &property.synthetic_method_for_delegate {
            self.out.indent();
            self.out.newline();
            self.out
                .write_indented("// Synthetic method for delegate: ");
            match self.resolve_method(artifact, signature) {
                Some((owner, method)) => self.method_description(owner, method),
                None => self.out.write("unknown"),
            }
            self.out.outdent();
        }

        if let Some(getter) = &property.getter {
            self.accessor(artifact, getter, "get", |_| {});
        }
        if let Some(setter) = &property.setter {
            let parameter = property.setter_parameter.as_ref();
            self.accessor(artifact, setter, "set", |session| {
                session.out.write("(");
                if let Some(parameter) = parameter {
                    session.value_parameter(0, parameter, Mutability::Plain);
                }
                session.out.write(")");
            });
        }

        self.out.newline();
    }

    /// One `get`/`set` line under a property, with a comment naming the JVM method that
    /// implements it.
    fn accessor(
        &mut self,
        artifact: &'p Artifact,
        accessor: &'p PropertyAccessor,
        keyword: &str,
        parameters: impl FnOnce(&mut Self),
    ) {
        self.out.indent();
        self.out.newline();
        let method = accessor
            .signature
            .as_ref()
            .and_then(|signature| self.resolve_method(artifact, signature));
        if let Some((_, method)) = method {
            self.jvm_annotations(&method.annotations, Placement::Block);
        }
        self.out
            .write_indented(&format!("{}{keyword}", accessor_flags(accessor)));
        parameters(self);
        match (&accessor.signature, method) {
            (Some(_), Some((owner, method))) => {
                self.out.write(&format!(" // {keyword}ter method: "));
                self.method_description(owner, method);
            }
            (None, _) if accessor.flags.contains(AccessorFlag::Default) => {
                self.out.write(&format!(" // default {keyword}ter"));
            }
            _ => {}
        }
        self.out.outdent();
    }

    pub(crate) fn type_alias(&mut self, alias: &'p TypeAlias) {
        self.kotlin_annotations(&alias.annotations, Placement::Block);
        if let Some(requirement) = &alias.version_requirement {
            self.visit(MetadataNode::VersionRequirement(requirement));
        }
        self.out
            .write_indented(&format!("typealias {}", alias.name));
        self.register_type_parameters(&alias.type_parameters);
        self.type_parameter_list(&alias.type_parameters, ">");
        self.out.write(" = ");
        self.visit(MetadataNode::Type(&alias.underlying_type));
        self.out.newline();
    }
}
