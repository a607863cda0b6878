/// Parser for `x,y,z` vector arguments
use nalgebra::Vector3;
use nom::{
    character::complete::{char, multispace0},
    combinator::all_consuming,
    number::complete::float,
    sequence::{delimited, terminated},
    IResult,
};

/// Parse a vector such as `1, 0, -2.5`
pub fn parse_vec3(input: &str) -> Result<Vector3<f32>, String> {
    match all_consuming(terminated(vec3, multispace0))(input) {
        Ok((_, (x, y, z))) => Ok(Vector3::new(x, y, z)),
        Err(e) => Err(format!("expected three comma-separated numbers like '1,0,-2': {:?}", e)),
    }
}

fn vec3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = comma(input)?;
    let (input, y) = float(input)?;
    let (input, _) = comma(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_vec3("1,0,-2").unwrap(), Vector3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_parse_with_spaces() {
        assert_eq!(parse_vec3(" 0.5 , -1.25,3e1 ").unwrap(), Vector3::new(0.5, -1.25, 30.0));
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,3,4").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }
}
