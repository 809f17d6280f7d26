use latexexpr::symbolic::{self, ConvertOptions};
use latexexpr::{add, div, pow, Error, Expression, Node, Variable};

/// Prints the processed node, or reports the error to stderr.
fn show(label: &str, result: Result<Node, Error>) {
    match result {
        Ok(node) => println!("{label}: {node}"),
        Err(err) => err.report_to_stderr(label),
    }
}

fn main() -> Result<(), Error> {
    let x = Variable::symbolic("x");
    let y = Variable::symbolic("y");
    let a = Variable::builder("a").value(1.5).unit("m").build();
    let options = ConvertOptions::default();

    let e = Expression::new("e_1", &a * &x + &x * &a + &y - &y);
    show("simplify", symbolic::simplify(&(&e).into(), &options));
    show(
        "simplify (substituted)",
        symbolic::simplify(&(&e).into(), &options.into_builder().substitute_floats(true).build()),
    );

    let product = (&x + 2) * (&x - 3);
    show("expand", symbolic::expand(&product.into(), &options));

    let cubic = pow(&x, 3) - pow(&x, 2) + &x - 1;
    show("factor", symbolic::factor(&cubic.into(), &options));

    let fraction = div(
        add([pow(&x, 2).into(), (2 * &x).into(), Node::from(1)])?,
        add([pow(&x, 2).into(), Node::from(&x)])?,
    );
    show("cancel", symbolic::cancel(&fraction.into(), &options));

    let fraction = div(1, pow(&x, 2) - 1);
    show("apart", symbolic::apart(&fraction.into(), Some(&x), &options));

    let sum = &a * &x * &y + &x * &y + &x;
    show("collect", symbolic::collect(&sum.into(), &[&x], &options));

    show("collect (no symbols)", symbolic::collect(&x.clone().into(), &[], &options));
    Ok(())
}
