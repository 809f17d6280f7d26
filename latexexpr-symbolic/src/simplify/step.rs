/// A rewriting rule applied by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// A nested sum or product was merged into its parent.
    Flatten,

    /// `a+0 = a`
    AddZero,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `sin(x)^2 + cos(x)^2 = 1`
    Pythagorean,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `2*3/4 = 3/2`
    CombineNumbers,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// `(a^b)^c = a^(b*c)`
    PowerPower,

    /// A power of two numbers was evaluated.
    EvaluatePower,

    /// `sqrt(12) = 2*sqrt(3)`
    Root,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a*b)^c = a^c * b^c`
    DistributePower,

    /// `(a+b)^n = (a+b)*(a+b)^(n-1)`
    ExpandPower,

    /// An exact value of `sin` was substituted.
    Sin,

    /// An exact value of `cos` was substituted.
    Cos,

    /// An exact value of `tan` was substituted.
    Tan,
}
