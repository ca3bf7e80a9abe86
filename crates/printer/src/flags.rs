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

//! Flag records to keyword prefixes. Every fragment ends in a space so the results can be
//! concatenated directly in front of a declaration.

use kmp_model::flags::{
    AccessorFlag, ClassFlag, ClassKind, FunctionFlag, MemberKind, Modality, PropertyFlag,
    TypeFlag, TypeParameterFlag, ValueParameterFlag, Visibility,
};
use kmp_model::{BitEnum, ClassMetadata, Function, Property, PropertyAccessor};

pub fn visibility(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Internal => "internal ",
        Visibility::Private => "private ",
        Visibility::Protected => "protected ",
        Visibility::Public | Visibility::PrivateToThis | Visibility::Local => "",
    }
}

/// `abstract` is implied for interfaces, so callers can ask for it to be left out.
pub fn modality(modality: Modality, print_abstract: bool) -> &'static str {
    match modality {
        Modality::Final => "",
        Modality::Open => "open ",
        Modality::Abstract if print_abstract => "abstract ",
        Modality::Abstract => "",
        Modality::Sealed => "sealed ",
    }
}

pub fn member_kind(kind: MemberKind) -> &'static str {
    match kind {
        MemberKind::Declaration => "",
        MemberKind::FakeOverride => "fakeOverride ",
        MemberKind::Delegation => "by ",
        MemberKind::Synthesized => "/* synthetic */ ",
    }
}

fn keywords<T: Copy + num_traits::ToPrimitive>(
    out: &mut String,
    flags: BitEnum<T>,
    table: &[(T, &str)],
) {
    for (flag, keyword) in table {
        if flags.contains(*flag) {
            out.push_str(keyword);
        }
    }
}

pub fn class_flags(class: &ClassMetadata) -> String {
    let flags = class.flags;
    let kind = class.kind;
    let mut out = String::new();
    out.push_str(visibility(class.visibility));
    out.push_str(modality(class.modality, kind != ClassKind::Interface));
    if kind == ClassKind::AnnotationClass {
        out.push_str("annotation class ");
    }
    keywords(
        &mut out,
        flags,
        &[
            (ClassFlag::Inner, "inner "),
            (ClassFlag::Data, "data "),
            (ClassFlag::Value, "value "),
        ],
    );
    if kind == ClassKind::Class {
        out.push_str("class ");
    }
    keywords(&mut out, flags, &[(ClassFlag::Fun, "fun ")]);
    match kind {
        ClassKind::Interface => out.push_str("interface "),
        ClassKind::Object => out.push_str("object "),
        _ => {}
    }
    keywords(
        &mut out,
        flags,
        &[(ClassFlag::Expect, "expect "), (ClassFlag::External, "external ")],
    );
    match kind {
        ClassKind::CompanionObject => out.push_str("companion object "),
        ClassKind::EnumEntry => out.push_str("enum entry "),
        ClassKind::EnumClass => out.push_str("enum class "),
        _ => {}
    }
    keywords(
        &mut out,
        flags,
        &[
            (
                ClassFlag::CompiledInCompatibilityMode,
                "/* compiledInCompatibilityMode */ ",
            ),
            (
                ClassFlag::HasMethodBodiesInInterface,
                "/* hasMethodBodiesInInterface */",
            ),
        ],
    );
    out
}

pub fn function_flags(function: &Function) -> String {
    let mut out = String::new();
    out.push_str(visibility(function.visibility));
    out.push_str(modality(function.modality, true));
    out.push_str(member_kind(function.member_kind));
    keywords(
        &mut out,
        function.flags,
        &[
            (FunctionFlag::Inline, "inline "),
            (FunctionFlag::Infix, "infix "),
            (FunctionFlag::Operator, "operator "),
            (FunctionFlag::Tailrec, "tailrec "),
            (FunctionFlag::External, "external "),
            (FunctionFlag::Suspend, "suspend "),
            (FunctionFlag::Expect, "expect "),
        ],
    );
    out
}

pub fn property_flags(property: &Property) -> String {
    let flags = property.flags;
    let mut out = String::new();
    out.push_str(visibility(property.visibility));
    out.push_str(modality(property.modality, true));
    out.push_str(member_kind(property.member_kind));
    out.push_str(if flags.contains(PropertyFlag::Var) {
        "var "
    } else {
        "val "
    });
    keywords(
        &mut out,
        flags,
        &[
            (PropertyFlag::Const, "const "),
            (PropertyFlag::Lateinit, "lateinit "),
            (PropertyFlag::External, "external "),
            (PropertyFlag::Delegated, "/* delegated */ "),
            (PropertyFlag::Expect, "expect "),
            (
                PropertyFlag::MovedFromInterfaceCompanion,
                "movedFromInterfaceCompanion ",
            ),
        ],
    );
    out
}

pub fn accessor_flags(accessor: &PropertyAccessor) -> String {
    let mut out = String::new();
    out.push_str(visibility(accessor.visibility));
    out.push_str(modality(accessor.modality, true));
    keywords(
        &mut out,
        accessor.flags,
        &[
            (AccessorFlag::External, "external "),
            (AccessorFlag::Inline, "inline "),
        ],
    );
    out
}

pub fn type_flags(flags: BitEnum<TypeFlag>) -> &'static str {
    if flags.contains(TypeFlag::Suspend) {
        "suspend "
    } else {
        ""
    }
}

pub fn type_parameter_flags(flags: BitEnum<TypeParameterFlag>) -> &'static str {
    if flags.contains(TypeParameterFlag::Reified) {
        "reified "
    } else {
        ""
    }
}

pub fn value_parameter_flags(flags: BitEnum<ValueParameterFlag>) -> String {
    let mut out = String::new();
    keywords(
        &mut out,
        flags,
        &[
            (ValueParameterFlag::Crossinline, "crossinline "),
            (ValueParameterFlag::Noinline, "noinline "),
        ],
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmp_model::KotlinType;
    use test_case::test_case;

    fn class(kind: ClassKind, modality: Modality, flags: &[ClassFlag]) -> ClassMetadata {
        ClassMetadata {
            kind,
            modality,
            flags: flags.iter().copied().collect(),
            ..ClassMetadata::new("pkg/C")
        }
    }

    #[test_case(ClassKind::Class, Modality::Final, &[], "class "; "plain class")]
    #[test_case(ClassKind::Class, Modality::Final, &[ClassFlag::Data], "data class "; "data class")]
    #[test_case(ClassKind::Class, Modality::Sealed, &[ClassFlag::Inner], "sealed inner class "; "sealed inner")]
    #[test_case(ClassKind::Interface, Modality::Abstract, &[], "interface "; "interface drops abstract")]
    #[test_case(ClassKind::Interface, Modality::Abstract, &[ClassFlag::Fun], "fun interface "; "fun interface")]
    #[test_case(ClassKind::Class, Modality::Abstract, &[], "abstract class "; "abstract class")]
    #[test_case(ClassKind::AnnotationClass, Modality::Final, &[], "annotation class "; "annotation")]
    #[test_case(ClassKind::EnumClass, Modality::Final, &[], "enum class "; "enum")]
    #[test_case(ClassKind::CompanionObject, Modality::Final, &[], "companion object "; "companion")]
    #[test_case(ClassKind::Object, Modality::Final, &[ClassFlag::Data], "data object "; "data object")]
    #[test_case(ClassKind::Class, Modality::Final, &[ClassFlag::Value], "value class "; "value class")]
    fn test_class_flags(kind: ClassKind, modality: Modality, flags: &[ClassFlag], expected: &str) {
        assert_eq!(class_flags(&class(kind, modality, flags)), expected);
    }

    #[test]
    fn test_class_visibility() {
        let class = ClassMetadata {
            visibility: Visibility::Internal,
            modality: Modality::Open,
            ..ClassMetadata::new("pkg/C")
        };
        assert_eq!(class_flags(&class), "internal open class ");
    }

    #[test]
    fn test_function_flags_order() {
        let function = Function {
            visibility: Visibility::Private,
            member_kind: MemberKind::Synthesized,
            flags: [FunctionFlag::Suspend, FunctionFlag::Inline, FunctionFlag::Operator]
                .into_iter()
                .collect(),
            ..Function::new("f", KotlinType::class("kotlin/Unit"))
        };
        assert_eq!(
            function_flags(&function),
            "private /* synthetic */ inline operator suspend "
        );
    }

    #[test_case(&[], "val "; "val")]
    #[test_case(&[PropertyFlag::Var, PropertyFlag::Lateinit], "var lateinit "; "lateinit var")]
    #[test_case(&[PropertyFlag::Const], "val const "; "const val")]
    #[test_case(&[PropertyFlag::Delegated], "val /* delegated */ "; "delegated")]
    fn test_property_flags(flags: &[PropertyFlag], expected: &str) {
        let property = Property {
            flags: flags.iter().copied().collect(),
            ..Property::new("p", KotlinType::class("kotlin/Int"))
        };
        assert_eq!(property_flags(&property), expected);
    }

    #[test]
    fn test_leaf_flags() {
        assert_eq!(type_flags(BitEnum::new_with(TypeFlag::Suspend)), "suspend ");
        assert_eq!(type_flags(BitEnum::new_with(TypeFlag::Nullable)), "");
        assert_eq!(
            type_parameter_flags(BitEnum::new_with(TypeParameterFlag::Reified)),
            "reified "
        );
        assert_eq!(
            value_parameter_flags(
                BitEnum::new_with(ValueParameterFlag::Noinline) | ValueParameterFlag::Crossinline
            ),
            "crossinline noinline "
        );
        let accessor = PropertyAccessor {
            visibility: Visibility::Protected,
            flags: BitEnum::new_with(AccessorFlag::Inline),
            ..Default::default()
        };
        assert_eq!(accessor_flags(&accessor), "protected inline ");
    }
}
