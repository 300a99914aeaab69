pub mod a025_affiliate_order;
