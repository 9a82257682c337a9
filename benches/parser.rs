//! Parser benchmarks
//!
//! Run with: cargo bench --bench parser
//! Profile with: cargo flamegraph --bench parser -- --bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tern_dts::AtomTable;
use tern_dts::parser::Parser;

/// Plain function declarations
const FUNCTIONS: &str = r#"
declare function simple(): void;
declare function typed(a: number, b: string): boolean;
declare function optional(a?: number, b?: string): void;
declare function rest(...args: number[]): number;
declare function callback(cb: (err: Error, data?: string) => void): void;
declare function generic<T, U extends T>(value: T, other: U): T;
declare function guard(x: any): x is string;
"#;

/// Namespaces, nested and dotted
const NAMESPACES: &str = r#"
declare namespace outer {
    namespace inner {
        function f(): void;
        var v: number;
    }
    function g(a: inner.Thing): outer.Result;
}
declare namespace A.B.C {
    function deep(): string;
}
declare module "quoted-module" {
    export function f(): void;
    export = f;
}
"#;

/// Interfaces and type literals
const INTERFACES: &str = r#"
interface User {
    id: number;
    name: string;
    email?: string;
    readonly createdAt: Date;
    updateProfile(data: Partial<User>): Promise<void>;
    (query: string): User[];
    new (id: number): User;
    [key: string]: any;
}
interface Admin extends User, Auditable {
    permissions: string[];
    settings: { theme: string; notifications: { email: boolean; sms: boolean } };
}
"#;

/// Classes with modifiers and accessors
const CLASSES: &str = r#"
declare class Counter extends Base implements ICounter {
    private name: string;
    public readonly id: number;
    static instances: number;
    constructor(name: string, initialValue?: number);
    get value(): number;
    set value(n: number);
    increment(): this;
    static create(name: string): Counter;
}
export declare abstract class Shape<T> {
    protected abstract area(): number;
}
"#;

/// Types the translator rejects, which the parser still has to accept
const ADVANCED_TYPES: &str = r#"
type Result<T, E> = { ok: true; value: T } | { ok: false; error: E };
type Keys = keyof User;
type Optional<T> = T | null | undefined;
type Pair = [first: string, second?: number];
type Picked = { readonly [K in keyof T]?: T[K] };
type Cond<T> = T extends string ? "s" : T extends number ? "n" : never;
type Ctor = abstract new (...args: any[]) => object;
"#;

/// Import/export statements
const MODULES: &str = r#"
import fs = require("fs");
import ev = events.EventEmitter;
import { foo, bar } from './module';
import * as namespace from './namespace';
import type { TypeOnly } from './types';
export { foo, bar };
export * from './reexport';
export as namespace MyLib;
export default class DefaultClass {}
"#;

/// Large realistic file
fn generate_large_source(size: usize) -> String {
    let mut source = String::with_capacity(size);
    let patterns = [FUNCTIONS, NAMESPACES, INTERFACES, CLASSES, ADVANCED_TYPES];

    let mut i = 0;
    while source.len() < size {
        if let Some(pattern) = patterns.get(i % patterns.len()) {
            source.push_str(pattern);
            source.push_str("\n\n");
        }
        i += 1;
    }
    source
}

/// Namespaces nested `depth` levels deep, one function at each level
fn generate_nested_namespaces(depth: usize) -> String {
    let mut source = String::new();
    for level in 0..depth {
        source.push_str(&format!("declare namespace n{} {{\n", level));
        source.push_str(&format!("function f{}(a: {{ x: number }}): void;\n", level));
    }
    for _ in 0..depth {
        source.push_str("}\n");
    }
    source
}

fn bench_parser_individual(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/individual");

    let cases = [
        ("functions", FUNCTIONS),
        ("namespaces", NAMESPACES),
        ("interfaces", INTERFACES),
        ("classes", CLASSES),
        ("advanced_types", ADVANCED_TYPES),
        ("modules", MODULES),
    ];

    for (name, source) in cases {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("bytes", name), source, |b, s| {
            b.iter(|| {
                let mut atoms = AtomTable::new();
                let mut parser = Parser::new(black_box(s), &mut atoms);
                let result = parser.parse_source_file("bench.d.ts");
                black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_parser_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/throughput");

    for size in [1_000, 10_000, 100_000, 500_000] {
        let source = generate_large_source(size);
        let actual_size = source.len();

        group.throughput(Throughput::Bytes(actual_size as u64));
        group.bench_with_input(
            BenchmarkId::new("large_source", format!("{}KB", actual_size / 1024)),
            &source,
            |b, s| {
                b.iter(|| {
                    let mut atoms = AtomTable::new();
                    let mut parser = Parser::new(black_box(s), &mut atoms);
                    let result = parser.parse_source_file("bench.d.ts");
                    black_box(result)
                });
            },
        );
    }

    group.finish();
}

fn bench_parser_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/nesting_depth");

    for depth in [5, 20, 50, 100] {
        let source = generate_nested_namespaces(depth);

        group.bench_with_input(BenchmarkId::new("depth", depth), &source, |b, s| {
            b.iter(|| {
                let mut atoms = AtomTable::new();
                let mut parser = Parser::new(black_box(s), &mut atoms);
                let result = parser.parse_source_file("bench.d.ts");
                black_box(result)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_individual,
    bench_parser_throughput,
    bench_parser_nesting_depth,
);
criterion_main!(benches);
