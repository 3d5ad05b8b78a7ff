// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate derive_new;

#[macro_use]
extern crate log;

extern crate chrono;
extern crate serde;
extern crate serde_json;
extern crate rmp_serde;

pub mod config;
pub mod roster;
pub mod party;
pub mod api;

/*
    Common error_chain for all of lib to use so the ? operator passes things around real well.

    Add `use ::errors::*;` to the sub-modules to gain access to it.

    Only malformed input and rejected mutations are errors. Shortfalls found while building parties
    (no buffers, not enough dealers, optimizer hitting its pass cap) are reported as `party::Warning`s.
*/
pub mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    error_chain!{
        foreign_links {
            Io(::std::io::Error);
            Json(::serde_json::Error);
            ToRmp(::rmp_serde::encode::Error);
            ParseInt(::std::num::ParseIntError);
            ParseFloat(::std::num::ParseFloatError);
        }

        errors {
            InvalidMember(account: String, name: String, reason: String) {
                description("invalid roster member")
                display("Invalid member {}/{}: {}", account, name, reason)
            }
            UnknownCategory(tag: String) {
                description("unknown category")
                display("Unknown category: '{}'", tag)
            }
            UnknownRole(tag: String) {
                description("unknown role tag")
                display("Unknown role tag: '{}'", tag)
            }
            ConstraintViolation(reason: String) {
                description("party constraint violation")
                display("Rejected party mutation: {}", reason)
            }
            InvalidConfig(reason: String) {
                description("invalid party config")
                display("Invalid party config: {}", reason)
            }
            RunInProgress(key: String) {
                description("run already in progress")
                display("A run for '{}' is already in progress", key)
            }
        }
    }
}
