use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emberscript::syntax::parser::Parser;

const SOURCE: &str = r#"
def fib(n)
  n < 2 ? n : fib(n - 1) + fib(n - 2)
end

def greet(name)
  message = "hello, " + name
  message
end

x = fib(10)
y = greet("world")
if x > 10
  x
else
  y
end
"#;

fn parse_program(c: &mut Criterion) {
    c.bench_function("parse medium program", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(SOURCE));
            black_box(parser.parse_program())
        })
    });
}

criterion_group!(benches, parse_program);
criterion_main!(benches);
