//! Tests for the parser
//!
//! These tests verify that the parser turns declaration-file source into the
//! syntax tree the translator walks.

use tern_dts::{AtomTable, TranslateError};
use tern_dts::ast::{
    Declaration, ModuleName, ParameterName, PropertyName, SourceFile, SyntaxKind, TypeKeyword,
    TypeNode,
};
use tern_dts::parser::Parser;

#[allow(clippy::unwrap_used)]
fn parse(source: &str) -> SourceFile {
    let mut atoms = AtomTable::new();
    Parser::new(source, &mut atoms)
        .parse_source_file("test.d.ts")
        .unwrap()
}

fn parse_err(source: &str) -> TranslateError {
    let mut atoms = AtomTable::new();
    match Parser::new(source, &mut atoms).parse_source_file("test.d.ts") {
        Err(e) => e,
        Ok(file) => panic!("expected a syntax error, got {:?}", file.members),
    }
}

fn kinds(members: &[Declaration]) -> Vec<SyntaxKind> {
    members.iter().map(Declaration::kind).collect()
}

/// Type of the first parameter of the first declared function
fn first_param_type(source: &str) -> TypeNode {
    let file = parse(source);
    let Some(Declaration::Function(func)) = file.members.first() else {
        panic!("expected function in {}", source);
    };
    let Some(ty) = func
        .signature
        .params
        .first()
        .and_then(|p| p.type_annotation.clone())
    else {
        panic!("expected annotated parameter in {}", source);
    };
    ty
}

const LIBRARY: &str = r#"
/// <reference path="globals.d.ts" />

declare namespace mylib {
    interface Options {
        verbose?: boolean;
        retries: number;
    }

    /** Adds two numbers */
    function add(a: number, b?: number): number;
    function configure(options: Options): void;

    namespace util {
        function noop(): void;
    }

    var version: string;
}

declare module "mylib" {
    export = mylib;
}
"#;

#[test]
fn test_library_file() {
    let file = parse(LIBRARY);
    assert_eq!(file.name, "test.d.ts");
    assert_eq!(
        kinds(&file.members),
        vec![
            SyntaxKind::ModuleDeclaration,
            SyntaxKind::ModuleDeclaration,
            SyntaxKind::EndOfFileToken,
        ]
    );

    let Some(Declaration::Module(ns)) = file.members.first() else {
        panic!("expected namespace");
    };
    assert!(ns.modifiers.declare);
    assert!(matches!(&ns.name, ModuleName::Identifier(id) if id.name == "mylib"));
    assert_eq!(
        ns.body.as_deref().map(kinds),
        Some(vec![
            SyntaxKind::InterfaceDeclaration,
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::ModuleDeclaration,
            SyntaxKind::VariableStatement,
        ])
    );
}

#[test]
fn test_parameters() {
    let file = parse("declare function f(a: string, b?: number, ...rest: any[]): void;");
    let Some(Declaration::Function(func)) = file.members.first() else {
        panic!("expected function");
    };
    let params = &func.signature.params;
    assert_eq!(params.len(), 3);

    let names: Vec<&str> = params.iter().map(|p| p.name.text()).collect();
    assert_eq!(names, vec!["a", "b", "rest"]);
    assert!(params.get(1).is_some_and(|p| p.optional && !p.rest));
    assert!(params.get(2).is_some_and(|p| p.rest && !p.optional));
    assert!(matches!(
        params.get(2).and_then(|p| p.type_annotation.as_ref()),
        Some(TypeNode::Array(_))
    ));
}

#[test]
fn test_parameter_forms() {
    let file = parse(
        "declare class C {
            constructor(private readonly a: number, public b?: string);
            method(this: C, { x, y }: Point, [first]: string[], c = 5): void;
        }",
    );
    let Some(Declaration::Class(class)) = file.members.first() else {
        panic!("expected class");
    };
    let Some(Declaration::Constructor(ctor)) = class.members.first() else {
        panic!("expected constructor");
    };
    let names: Vec<&str> = ctor.signature.params.iter().map(|p| p.name.text()).collect();
    assert_eq!(names, vec!["a", "b"]);

    let Some(Declaration::MethodSignature(method)) = class.members.get(1) else {
        panic!("expected method");
    };
    let names: Vec<&str> = method.signature.params.iter().map(|p| p.name.text()).collect();
    assert_eq!(names, vec!["this", "arg", "arg", "c"]);
    assert!(matches!(
        method.signature.params.get(1).map(|p| &p.name),
        Some(ParameterName::Pattern(_))
    ));
}

#[test]
fn test_keyword_types() {
    let cases = [
        ("string", TypeKeyword::String),
        ("number", TypeKeyword::Number),
        ("boolean", TypeKeyword::Boolean),
        ("any", TypeKeyword::Any),
        ("void", TypeKeyword::Void),
    ];
    for (source, expected) in cases {
        let ty = first_param_type(&format!("declare function f(a: {}): void;", source));
        let TypeNode::Keyword(keyword) = ty else {
            panic!("expected keyword type for {}", source);
        };
        assert_eq!(keyword.keyword, expected, "{}", source);
    }
}

#[test]
fn test_qualified_names_nest_left() {
    let ty = first_param_type("declare function f(a: A.B.C): void;");
    let TypeNode::Qualified(outer) = ty else {
        panic!("expected qualified name");
    };
    assert!(matches!(outer.right.as_ref(), TypeNode::Identifier(id) if id.name == "C"));
    let TypeNode::Qualified(inner) = outer.left.as_ref() else {
        panic!("expected nested qualified name");
    };
    assert!(matches!(inner.left.as_ref(), TypeNode::Identifier(id) if id.name == "A"));
    assert!(matches!(inner.right.as_ref(), TypeNode::Identifier(id) if id.name == "B"));
}

#[test]
fn test_array_of_function_type() {
    let ty = first_param_type("declare function f(a: ((x: number) => void)[]): void;");
    let TypeNode::Array(array) = ty else {
        panic!("expected array type");
    };
    assert_eq!(array.element_type.kind(), SyntaxKind::FunctionType);
}

#[test]
fn test_nested_generic_arguments() {
    let ty = first_param_type("declare function f(a: Map<string, Array<Set<number>>>): void;");
    let TypeNode::Reference(reference) = ty else {
        panic!("expected type reference");
    };
    assert_eq!(reference.type_arguments.len(), 2);
}

#[test]
fn test_import_type() {
    let ty = first_param_type("declare function f(a: import(\"./m\").A.B<string>): void;");
    let TypeNode::Import(import) = ty else {
        panic!("expected import type");
    };
    assert!(!import.is_typeof);
    assert_eq!(import.module, "./m");
    let qualifier: Vec<&str> = import.qualifier.iter().map(|name| name.as_str()).collect();
    assert_eq!(qualifier, vec!["A", "B"]);
    assert_eq!(import.type_arguments.len(), 1);

    let ty = first_param_type("declare function f(a: typeof import(\"m\")): void;");
    assert!(matches!(
        ty,
        TypeNode::Import(import) if import.is_typeof && import.qualifier.is_empty()
    ));
}

#[test]
fn test_private_class_members() {
    let file = parse("declare class C {\n    #private;\n    static #count: number;\n    x: number;\n}");
    let Some(Declaration::Class(class)) = file.members.first() else {
        panic!("expected class");
    };
    let names: Vec<Option<&str>> = class
        .members
        .iter()
        .map(|m| match m {
            Declaration::PropertySignature(prop) => prop.name.text(),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec![None, None, Some("x")]);
    assert!(matches!(
        class.members.first(),
        Some(Declaration::PropertySignature(prop)) if matches!(prop.name, PropertyName::Computed(_))
    ));
}

#[test]
fn test_type_literal_members() {
    let ty = first_param_type(
        "declare function f(a: {
            x: number,
            'quoted-name': string;
            42: boolean
            m(): void
            [key: string]: any
        }): void;",
    );
    let TypeNode::Object(object) = ty else {
        panic!("expected type literal");
    };
    assert_eq!(
        kinds(&object.members),
        vec![
            SyntaxKind::PropertySignature,
            SyntaxKind::PropertySignature,
            SyntaxKind::PropertySignature,
            SyntaxKind::MethodSignature,
            SyntaxKind::IndexSignature,
        ]
    );
    let Some(Declaration::PropertySignature(quoted)) = object.members.get(1) else {
        panic!("expected property");
    };
    assert!(matches!(&quoted.name, PropertyName::String(name, _) if name == "quoted-name"));
}

#[test]
fn test_accessors_become_properties() {
    let file = parse(
        "declare class C {
            get size(): number;
            set label(value: string);
        }",
    );
    let Some(Declaration::Class(class)) = file.members.first() else {
        panic!("expected class");
    };
    let types: Vec<Option<SyntaxKind>> = class
        .members
        .iter()
        .map(|m| match m {
            Declaration::PropertySignature(prop) => prop.type_annotation.as_ref().map(|t| t.kind()),
            _ => None,
        })
        .collect();
    assert_eq!(
        types,
        vec![Some(SyntaxKind::NumberKeyword), Some(SyntaxKind::StringKeyword)]
    );
}

#[test]
fn test_class_heritage_and_modifiers() {
    let file = parse(
        "export declare abstract class Widget<T> extends Base<T> implements A, B.C {
            protected abstract render(): void;
            static readonly count: number;
            @observable value: T;
        }",
    );
    let Some(Declaration::Class(class)) = file.members.first() else {
        panic!("expected class");
    };
    assert!(class.modifiers.export && class.modifiers.declare && class.modifiers.abstract_);
    assert!(class.type_parameters.is_some());
    assert_eq!(class.extends.as_ref().map(|t| t.kind()), Some(SyntaxKind::TypeReference));
    assert_eq!(class.implements.len(), 2);
    assert_eq!(class.members.len(), 3);
    assert!(class.members.get(1).is_some_and(|m| {
        let modifiers = m.modifiers();
        modifiers.static_ && modifiers.readonly
    }));
}

#[test]
fn test_source_with_bodies() {
    let file = parse(
        "export function greet(name: string): string {
            const message = `Hello ${name}`;
            return message;
        }
        export class Counter {
            private count = 0;
            increment(): number { return ++this.count; }
        }
        export const answer = 42;",
    );
    assert_eq!(
        kinds(&file.members),
        vec![
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::ClassDeclaration,
            SyntaxKind::VariableStatement,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_global_augmentation() {
    let file = parse("declare global { interface Window { app: any; } }");
    let Some(Declaration::Module(module)) = file.members.first() else {
        panic!("expected module");
    };
    assert_eq!(module.name.text(), "global");
    assert_eq!(module.body.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_asi_between_declarations() {
    let file = parse("declare var a: number\ndeclare var b: string\ndeclare function f(): void\n");
    assert_eq!(
        kinds(&file.members),
        vec![
            SyntaxKind::VariableStatement,
            SyntaxKind::VariableStatement,
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_namespace_export() {
    let file = parse("export as namespace MyLib;");
    let Some(Declaration::NamespaceExport(decl)) = file.members.first() else {
        panic!("expected namespace export");
    };
    assert_eq!(decl.name.name, "MyLib");
}

#[test]
fn test_syntax_errors() {
    for source in [
        "declare function f(a: number;",
        "declare namespace N { function f(): void;",
        "interface I { a: }",
        "declare function f(): ;",
        "+",
    ] {
        let err = parse_err(source);
        assert!(
            matches!(err, TranslateError::Syntax { .. }),
            "{}: {}",
            source,
            err
        );
    }
}

#[test]
fn test_syntax_error_reports_position() {
    let err = parse_err("declare namespace N {\n    function (): void;\n    +\n}");
    let TranslateError::Syntax { location, .. } = err else {
        panic!("expected syntax error");
    };
    assert_eq!(location.file.as_deref(), Some("test.d.ts"));
    assert_eq!(location.line, 3);
    assert_eq!(location.column, 5);
}
