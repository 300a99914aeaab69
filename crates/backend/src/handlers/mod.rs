pub mod d402_affiliate_commission;
