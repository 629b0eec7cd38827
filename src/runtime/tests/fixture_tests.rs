use super::fixture_test;

#[test]
fn hello_world() {
    fixture_test("hello_world");
}

#[test]
fn subtract() {
    fixture_test("subtract");
}

#[test]
fn countdown() {
    fixture_test("countdown");
}

#[test]
fn object_fields() {
    fixture_test("object_fields");
}

#[test]
fn globals() {
    fixture_test("globals");
}

#[test]
fn factorial() {
    fixture_test("factorial");
}

#[test]
fn strings() {
    fixture_test("strings");
}

#[test]
fn fresh_locals() {
    fixture_test("fresh_locals");
}

#[test]
fn stack_underflow() {
    fixture_test("stack_underflow");
}

#[test]
fn reserved_class() {
    fixture_test("reserved_class");
}

#[test]
fn unclosed_loop() {
    fixture_test("unclosed_loop");
}
